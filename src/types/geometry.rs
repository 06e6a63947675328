/// Географическая точка (долгота и широта).
///
/// Порядок координат фиксирован: сначала долгота, затем широта.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryPoint {
    pub lon: f64,
    pub lat: f64,
}

/// Ломаная: упорядоченная последовательность точек, дубликаты допустимы.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryLine(pub Vec<GeometryPoint>);

/// Полигон: первое кольцо внешнее, остальные внутренние. Геометрия не
/// проверяется.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryPolygon(pub Vec<GeometryLine>);

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl GeometryPoint {
    pub fn new(
        lon: f64,
        lat: f64,
    ) -> Self {
        Self { lon, lat }
    }
}

impl GeometryLine {
    pub fn new(points: Vec<GeometryPoint>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[GeometryPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl GeometryPolygon {
    pub fn new(rings: Vec<GeometryLine>) -> Self {
        Self(rings)
    }

    pub fn rings(&self) -> &[GeometryLine] {
        &self.0
    }

    /// Внешняя граница, если полигон не пуст.
    pub fn exterior(&self) -> Option<&GeometryLine> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl From<(f64, f64)> for GeometryPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl FromIterator<GeometryPoint> for GeometryLine {
    fn from_iter<I: IntoIterator<Item = GeometryPoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<GeometryLine> for GeometryPolygon {
    fn from_iter<I: IntoIterator<Item = GeometryLine>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
