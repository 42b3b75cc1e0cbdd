use serde::{Deserialize, Serialize};

/// Resampling kernel applied by the warp or shift engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleMethod {
    #[default]
    Nearest,
    Bilinear,
    Cubic,
    CubicSpline,
    Lanczos,
    Average,
    Mode,
    Max,
    Min,
    Median,
    FirstQuartile,
    ThirdQuartile,
}

impl ResampleMethod {
    pub const ALL: [ResampleMethod; 12] = [
        Self::Nearest,
        Self::Bilinear,
        Self::Cubic,
        Self::CubicSpline,
        Self::Lanczos,
        Self::Average,
        Self::Mode,
        Self::Max,
        Self::Min,
        Self::Median,
        Self::FirstQuartile,
        Self::ThirdQuartile,
    ];

    /// Spelling accepted by `gdalwarp -r`.
    pub fn gdal_name(self) -> &'static str {
        match self {
            Self::Nearest => "near",
            Self::CubicSpline => "cubicspline",
            other => other.arosics_name(),
        }
    }

    /// Spelling accepted by the shift engine's de-shifting resampler.
    pub fn arosics_name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::Cubic => "cubic",
            Self::CubicSpline => "cubic_spline",
            Self::Lanczos => "lanczos",
            Self::Average => "average",
            Self::Mode => "mode",
            Self::Max => "max",
            Self::Min => "min",
            Self::Median => "med",
            Self::FirstQuartile => "q1",
            Self::ThirdQuartile => "q3",
        }
    }
}

impl std::fmt::Display for ResampleMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest Neighbour"),
            Self::Bilinear => write!(f, "Bilinear"),
            Self::Cubic => write!(f, "Cubic"),
            Self::CubicSpline => write!(f, "Cubic Spline"),
            Self::Lanczos => write!(f, "Lanczos Windowed Sinc"),
            Self::Average => write!(f, "Average"),
            Self::Mode => write!(f, "Mode"),
            Self::Max => write!(f, "Maximum"),
            Self::Min => write!(f, "Minimum"),
            Self::Median => write!(f, "Median"),
            Self::FirstQuartile => write!(f, "First Quartile"),
            Self::ThirdQuartile => write!(f, "Third Quartile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_nearest() {
        assert_eq!(ResampleMethod::default(), ResampleMethod::Nearest);
    }

    #[test]
    fn test_engine_spellings_differ_only_where_expected() {
        let differing: Vec<_> = ResampleMethod::ALL
            .iter()
            .filter(|m| m.gdal_name() != m.arosics_name())
            .collect();
        assert_eq!(
            differing,
            vec![&ResampleMethod::Nearest, &ResampleMethod::CubicSpline]
        );
    }
}
