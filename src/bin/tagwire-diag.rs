//! CLI для просмотра CBOR-ответов сервера.
//!
//! Читает полезную нагрузку из файла или stdin и печатает её либо в
//! диагностической нотации (`89([88([1.0, 2.0])])`), либо как дерево
//! декодированных значений.

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tagwire::{init_logging, Codec, CodecSettings};
use tracing::debug;

/// Аргументы командной строки.
#[derive(Parser)]
#[command(name = "tagwire-diag")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("GIT_COMMIT"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
))]
#[command(about = "Inspect tagged CBOR payloads", long_about = None)]
struct Cli {
    /// Файл с полезной нагрузкой; без него читается stdin
    #[arg(help = "Путь к файлу (по умолчанию stdin)")]
    input: Option<PathBuf>,
    /// Вход является hex-строкой, а не сырые байты
    #[arg(long, help = "Интерпретировать вход как hex-строку")]
    hex: bool,
    /// Формат вывода
    #[arg(long, value_enum, default_value = "diag", help = "Формат вывода")]
    format: OutputFormat,
    /// Включить подробный вывод (debug)
    #[arg(short, long, help = "Включить подробный вывод для отладки")]
    verbose: bool,
    /// Подавить логи полностью
    #[arg(short = 'q', long, help = "Подавить логирование")]
    quiet: bool,
}

/// Формат вывода CLI
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Диагностическая нотация CBOR
    Diag,
    /// Дерево значений после декодирования тегов
    Value,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        "off"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    init_logging(level).map_err(|e| anyhow::anyhow!(e))?;

    let raw = read_input(cli.input.as_ref())?;
    let bytes = if cli.hex { parse_hex(&raw)? } else { raw };
    debug!(bytes = bytes.len(), format = ?cli.format, "payload read");

    let rendered = render(&bytes, cli.format)?;
    println!("{rendered}");
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("Не удалось прочитать {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Не удалось прочитать stdin")?;
            Ok(buf)
        }
    }
}

/// Пробелы и переводы строк внутри hex-строки игнорируются.
fn parse_hex(raw: &[u8]) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(raw).context("hex-вход не является UTF-8")?;
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact).context("Некорректная hex-строка")
}

/// Лимиты берутся из `TAGWIRE_*` для обоих форматов.
fn render(
    bytes: &[u8],
    format: OutputFormat,
) -> Result<String> {
    let settings = CodecSettings::load().context("Некорректные настройки TAGWIRE_*")?;
    let codec = Codec::with_settings(settings)?;
    match format {
        OutputFormat::Diag => codec.diagnose(bytes).context("Не удалось разобрать CBOR"),
        OutputFormat::Value => {
            let value = codec.decode(bytes).context("Не удалось декодировать значение")?;
            Ok(format!("{value:#?}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_ignores_whitespace() {
        assert_eq!(parse_hex(b"c6 f6\n").unwrap(), vec![0xc6, 0xf6]);
        assert!(parse_hex(b"zz").is_err());
    }

    #[test]
    fn test_render_diag() {
        assert_eq!(render(&[0xc6, 0xf6], OutputFormat::Diag).unwrap(), "6(null)");
    }

    #[test]
    fn test_render_value_reports_unknown_tag() {
        // 999(null)
        let err = render(&[0xd9, 0x03, 0xe7, 0xf6], OutputFormat::Value).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported tag: 999"));
    }

    #[test]
    fn test_long_version_reports_build_info() {
        use clap::CommandFactory;

        let cmd = Cli::command();
        let long = cmd.get_long_version().unwrap_or_default();
        assert!(long.starts_with(env!("CARGO_PKG_VERSION")), "got: {long}");
        assert!(long.contains("commit "), "got: {long}");
        assert!(long.contains("built "), "got: {long}");
    }
}
