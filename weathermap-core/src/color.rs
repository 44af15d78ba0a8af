use serde::Serialize;

/// Color used for a marker whose city has no reading yet.
pub const NO_READING_COLOR: &str = "#b0b0b0";

/// Temperature bucket driving a marker's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBucket {
    /// t <= 0
    Blue,
    /// 0 < t < 10
    LightBlue,
    /// 10 <= t <= 20
    Yellow,
    /// 20 < t < 30
    Orange,
    /// t >= 30
    Red,
}

impl TemperatureBucket {
    /// Bucket for a Celsius temperature. Total over every finite value;
    /// NaN falls through to `Red`.
    pub fn from_celsius(t: f64) -> Self {
        if t <= 0.0 {
            Self::Blue
        } else if t < 10.0 {
            Self::LightBlue
        } else if t <= 20.0 {
            Self::Yellow
        } else if t < 30.0 {
            Self::Orange
        } else {
            Self::Red
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Self::Blue => "#0090f7",
            Self::LightBlue => "#87CEEB",
            Self::Yellow => "#f2da4e",
            Self::Orange => "#edb232",
            Self::Red => "#FF6347",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::LightBlue => "light-blue",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }

    pub const fn all() -> &'static [TemperatureBucket] {
        &[Self::Blue, Self::LightBlue, Self::Yellow, Self::Orange, Self::Red]
    }
}

impl std::fmt::Display for TemperatureBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
