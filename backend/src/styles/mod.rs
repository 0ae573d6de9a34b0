//! Render styles applied to story videos.
//!
//! Four canonical looks exist. Everything the clients send (aliases like
//! `memory_lane`, or the preset labels shown in the UI) resolves to one of
//! them; anything else means no grading at all.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    Cinematic,
    Vintage,
    Vibrant,
    BlackAndWhite,
}

/// Colour grading parameters of a style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Grading {
    /// Contrast equalisation clip limit, if contrast is boosted
    pub clip_limit: Option<f32>,
    /// Multiplier on saturation
    pub saturation: f32,
    /// Multiplier on brightness
    pub brightness: f32,
    /// Vignette strength; 0 disables it
    pub vignette: f32,
    /// Push shadows toward teal and highlights toward orange
    pub teal_orange_shift: i16,
    pub sepia: bool,
    /// Std deviation of film grain noise
    pub grain: f32,
    pub grayscale: bool,
}

pub const ALL_STYLES: [RenderStyle; 4] = [
    RenderStyle::Cinematic,
    RenderStyle::Vintage,
    RenderStyle::Vibrant,
    RenderStyle::BlackAndWhite,
];

impl RenderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStyle::Cinematic => "cinematic",
            RenderStyle::Vintage => "vintage",
            RenderStyle::Vibrant => "vibrant",
            RenderStyle::BlackAndWhite => "black_and_white",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RenderStyle::Cinematic => "Teal and orange grading with boosted contrast",
            RenderStyle::Vintage => "Sepia tone, film grain and muted colours",
            RenderStyle::Vibrant => "Saturated, slightly brighter colours",
            RenderStyle::BlackAndWhite => "High-contrast monochrome",
        }
    }

    pub fn grading(&self) -> Grading {
        let neutral = Grading {
            clip_limit: None,
            saturation: 1.0,
            brightness: 1.0,
            vignette: 0.0,
            teal_orange_shift: 0,
            sepia: false,
            grain: 0.0,
            grayscale: false,
        };
        match self {
            RenderStyle::Cinematic => Grading {
                clip_limit: Some(3.0),
                vignette: 0.3,
                teal_orange_shift: 10,
                ..neutral
            },
            RenderStyle::Vintage => Grading {
                saturation: 0.6,
                vignette: 0.4,
                sepia: true,
                grain: 15.0,
                ..neutral
            },
            RenderStyle::Vibrant => Grading {
                saturation: 1.5,
                brightness: 1.1,
                ..neutral
            },
            RenderStyle::BlackAndWhite => Grading {
                clip_limit: Some(4.0),
                vignette: 0.3,
                grayscale: true,
                ..neutral
            },
        }
    }

    /// Resolve a style name. Case, spaces and dashes are ignored.
    pub fn lookup(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match key.as_str() {
            "cinematic" | "cinematic_travel" => Some(RenderStyle::Cinematic),
            "vintage" | "memory_lane" => Some(RenderStyle::Vintage),
            "vibrant" | "instagram" | "instagram_reel" | "music_video" => {
                Some(RenderStyle::Vibrant)
            }
            "black_and_white" => Some(RenderStyle::BlackAndWhite),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_canonical_and_aliases() {
        assert_eq!(RenderStyle::lookup("cinematic"), Some(RenderStyle::Cinematic));
        assert_eq!(RenderStyle::lookup("BLACK_AND_WHITE"), Some(RenderStyle::BlackAndWhite));
        assert_eq!(RenderStyle::lookup("memory_lane"), Some(RenderStyle::Vintage));
        assert_eq!(RenderStyle::lookup("instagram"), Some(RenderStyle::Vibrant));
    }

    #[test]
    fn test_lookup_preset_labels() {
        assert_eq!(RenderStyle::lookup("Cinematic Travel"), Some(RenderStyle::Cinematic));
        assert_eq!(RenderStyle::lookup("Instagram Reel"), Some(RenderStyle::Vibrant));
        assert_eq!(RenderStyle::lookup("Memory Lane"), Some(RenderStyle::Vintage));
        assert_eq!(RenderStyle::lookup("Music Video"), Some(RenderStyle::Vibrant));
    }

    #[test]
    fn test_unknown_style() {
        assert_eq!(RenderStyle::lookup("watercolour"), None);
        assert_eq!(RenderStyle::lookup(""), None);
    }

    #[test]
    fn test_grading_parameters() {
        let vintage = RenderStyle::Vintage.grading();
        assert!(vintage.sepia);
        assert_eq!(vintage.saturation, 0.6);
        assert_eq!(vintage.vignette, 0.4);

        let vibrant = RenderStyle::Vibrant.grading();
        assert_eq!(vibrant.vignette, 0.0);
        assert_eq!(vibrant.saturation, 1.5);

        assert_eq!(RenderStyle::BlackAndWhite.grading().clip_limit, Some(4.0));
    }

    #[test]
    fn test_serializes_snake_case() {
        let value = serde_json::to_value(RenderStyle::BlackAndWhite).unwrap();
        assert_eq!(value, "black_and_white");
    }
}
