//! Static text keyed by category label.
//!
//! Details describe a measured feature. Lines are the sentences the
//! composer strings together into a suggestion.

use crate::classify::{AgeBracket, EyeColor, FaceShape, ForeheadHeight, HairColor, JawWidth, Symmetry};

/// Description and candidate haircut names for a face shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeStyles {
    pub description: &'static str,
    pub styles: &'static [&'static str],
}

const SHAPE_STYLES: &[(FaceShape, ShapeStyles)] = &[
    (
        FaceShape::Oval,
        ShapeStyles {
            description: "Your oval face shape is balanced enough to carry almost any cut.",
            styles: &["textured lob", "long layers with curtain bangs", "sleek pixie", "shoulder-length shag"],
        },
    ),
    (
        FaceShape::Round,
        ShapeStyles {
            description: "Height at the crown and lengths past the chin stretch a round face.",
            styles: &["long layered cut", "side-swept pixie", "asymmetric lob", "high-volume quiff"],
        },
    ),
    (
        FaceShape::Square,
        ShapeStyles {
            description: "Soft movement around the jaw balances strong square contours.",
            styles: &["wavy shag", "side-parted long layers", "feathered bob", "soft curtain fringe"],
        },
    ),
    (
        FaceShape::Heart,
        ShapeStyles {
            description: "Fullness at jaw level offsets a wider forehead and a delicate chin.",
            styles: &["chin-length bob", "side-swept bangs", "lob with flipped ends", "loose waves from mid-length"],
        },
    ),
    (
        FaceShape::Diamond,
        ShapeStyles {
            description: "Width at forehead and chin softens prominent cheekbones.",
            styles: &["full fringe", "tucked-behind-the-ear bob", "textured shag", "deep side part with waves"],
        },
    ),
];

const DEFAULT_SHAPE_STYLES: ShapeStyles = ShapeStyles {
    description: "Your face shape could not be read clearly, so here is a versatile classic.",
    styles: &["layered lob", "soft long layers"],
};

/// Table lookup with the default pair as the fallback.
pub fn shape_styles(shape: FaceShape) -> &'static ShapeStyles {
    SHAPE_STYLES
        .iter()
        .find(|(s, _)| *s == shape)
        .map(|(_, styles)| styles)
        .unwrap_or(&DEFAULT_SHAPE_STYLES)
}

pub fn eye_detail(label: EyeColor) -> &'static str {
    match label {
        EyeColor::Blue => "A cool eye color that pairs beautifully with light, cool shades.",
        EyeColor::Green => "Warm undertones make your eye color stand out.",
        EyeColor::HazelBrown => "Rich tones and gentle contrast bring depth to the look.",
        EyeColor::Gray => "Neutral colors and clean contours bring out your eyes.",
        EyeColor::Unknown => "No usable eye region in this frame.",
    }
}

pub fn eye_line(label: EyeColor) -> &'static str {
    match label {
        EyeColor::Blue => "Cool balayage or ashy tones make your eyes shine.",
        EyeColor::Green => "Golden highlights or warm copper tones intensify a lively look.",
        EyeColor::HazelBrown => "Rich chocolate or caramel shades give your eyes depth.",
        EyeColor::Gray | EyeColor::Unknown => "Neutral or platinum highlights emphasize a calm eye color.",
    }
}

pub fn hair_detail(label: HairColor) -> &'static str {
    match label {
        HairColor::Black => "Deep, dark hair with strong contrast.",
        HairColor::DarkBrown => "Dark brown hair with a warm base.",
        HairColor::Brown => "Medium brown hair that takes color well.",
        HairColor::Blond => "Light hair that reflects a lot of light.",
        HairColor::Red => "Red tones with high saturation.",
        HairColor::GrayWhite => "Silver or white hair with little saturation.",
        HairColor::Unknown => "No hair visible above the face in this frame.",
    }
}

pub fn hair_line(label: HairColor) -> Option<&'static str> {
    match label {
        HairColor::Black => Some("Blue-black gloss or subtle espresso lowlights keep dark hair rich."),
        HairColor::DarkBrown => Some("Face-framing caramel ribbons lift dark brown hair."),
        HairColor::Brown => Some("Honey babylights add dimension to medium brown hair."),
        HairColor::Blond => Some("A root shadow gives light hair depth and makes it look fuller."),
        HairColor::Red => Some("A copper gloss refreshes red tones between colorings."),
        HairColor::GrayWhite => Some("A silver toner keeps gray and white hair bright."),
        HairColor::Unknown => None,
    }
}

pub fn forehead_detail(label: ForeheadHeight) -> &'static str {
    match label {
        ForeheadHeight::High => "A soft fringe or volume at the temples creates balance.",
        ForeheadHeight::Low => "Lengths opened upward visually lengthen the face.",
        ForeheadHeight::Balanced => "Naturally proportioned forehead; fringe or open face both work.",
        ForeheadHeight::Unknown => "Forehead could not be measured in this frame.",
    }
}

pub fn forehead_line(label: ForeheadHeight) -> &'static str {
    match label {
        ForeheadHeight::High => "A textured, slightly wispy fringe visually shortens the forehead.",
        ForeheadHeight::Low => "Volume at the crown and side-swept ends lengthen your face.",
        ForeheadHeight::Balanced | ForeheadHeight::Unknown => {
            "Play with a middle part or soft curtain bangs for versatile looks."
        }
    }
}

pub fn jaw_detail(label: JawWidth) -> &'static str {
    match label {
        JawWidth::Wide => "Soft layers and volume on top create balance.",
        JawWidth::Narrow => "Width at the sides and textured ends give the face more presence.",
        JawWidth::Medium => "Balanced jawline; many cuts suit you.",
        JawWidth::Unknown => "Jawline could not be measured in this frame.",
    }
}

pub fn jaw_line(label: JawWidth) -> &'static str {
    match label {
        JawWidth::Wide => "Layered lengths that end below the jaw create a slimmer silhouette.",
        JawWidth::Narrow => "A chin-length bob or waves with side volume look especially harmonious.",
        JawWidth::Medium | JawWidth::Unknown => {
            "A modern long bob with soft waves brings movement without losing balance."
        }
    }
}

pub fn symmetry_detail(label: Symmetry) -> &'static str {
    match label {
        Symmetry::VerySymmetric => "You can wear a clean middle part or graphic cuts with ease.",
        Symmetry::SlightlyAsymmetric => "Asymmetric details or side fringes add exciting accents.",
        Symmetry::Balanced => "Very harmonious proportions; precise cuts look especially elegant.",
        Symmetry::Unknown => "Symmetry could not be measured in this frame.",
    }
}

pub fn symmetry_line(label: Symmetry) -> &'static str {
    match label {
        Symmetry::SlightlyAsymmetric => "Try a side part or an asymmetric bob for extra dynamics.",
        _ => "Clearly defined lines and precise cuts underline your natural symmetry.",
    }
}

pub fn age_detail(label: AgeBracket) -> &'static str {
    match label {
        AgeBracket::Under25 => "Bold cuts and playful color experiments fit well.",
        AgeBracket::From25To39 => "Polished cuts with low-maintenance texture fit well.",
        AgeBracket::From40To54 => "Soft layers and dimensional color keep the look fresh.",
        AgeBracket::From55 => "Lightweight layers and gloss keep hair bright and full.",
        AgeBracket::Unknown => "No age estimate available.",
    }
}

pub fn age_line(label: AgeBracket) -> Option<&'static str> {
    match label {
        AgeBracket::Under25 => Some("This is a great time to try a bold cut or a trend color."),
        AgeBracket::From25To39 => Some("Choose cuts that grow out gracefully between salon visits."),
        AgeBracket::From40To54 => Some("Soft face-framing layers and multi-tonal color add lift."),
        AgeBracket::From55 => Some("Shorter layered cuts and a shine gloss add lightness."),
        AgeBracket::Unknown => None,
    }
}
