//! End-to-end tests from landmarks and pixels to a composed suggestion.

use face_stylist::classify::{classify_eye_color, classify_face_shape, classify_forehead, classify_jaw};
use face_stylist::config::Band;
use face_stylist::{
    landmark, symmetry_score, AgeBracket, Analyzer, BoundingBox, CaptureSession, Composer, Config,
    Detection, EyeColor, FaceMetrics, FaceShape, ForeheadHeight, Frame, Gender, HairColor,
    Camera, ImageSequenceCamera, JawWidth, Point, ReplayDetector, Rgb, Shape, Symmetry, NUM_LANDMARKS,
};
use proptest::prelude::*;

/// Face box (100, 100) 250x200, mirror symmetric about x = 225.
///
/// Brow line 50 px below the box top, jaw points 150 px apart, outer brows
/// 190 px apart and cheekbones 230 px apart.
fn face() -> Detection {
    let bbox = BoundingBox::new(100.0, 100.0, 250.0, 200.0);
    let mut shape = Shape::new(vec![Point::new(225.0, 220.0); NUM_LANDMARKS]);

    for i in landmark::BROWS {
        let t = (i - 17) as f32 / 9.0;
        shape[i] = Point::new(130.0 + 190.0 * t, 150.0);
    }
    shape[landmark::CHEEK_LEFT] = Point::new(110.0, 200.0);
    shape[landmark::CHEEK_RIGHT] = Point::new(340.0, 200.0);
    shape[3] = Point::new(115.0, 230.0);
    shape[13] = Point::new(335.0, 230.0);
    shape[landmark::JAW_LEFT] = Point::new(150.0, 250.0);
    shape[landmark::JAW_RIGHT] = Point::new(300.0, 250.0);
    shape[landmark::CHIN] = Point::new(225.0, 300.0);

    let right_eye = [(165.0, 170.0), (171.0, 166.0), (183.0, 166.0), (195.0, 170.0), (183.0, 174.0), (171.0, 174.0)];
    for (offset, &(x, y)) in right_eye.iter().enumerate() {
        shape[36 + offset] = Point::new(x, y);
    }
    // Left eye mirrors the right one: 42 <-> 39, 45 <-> 36
    let left_eye = [(255.0, 170.0), (267.0, 166.0), (279.0, 166.0), (285.0, 170.0), (279.0, 174.0), (267.0, 174.0)];
    for (offset, &(x, y)) in left_eye.iter().enumerate() {
        shape[42 + offset] = Point::new(x, y);
    }

    Detection::new(bbox, shape).with_age(47.0).with_gender(Gender::Male)
}

/// Blond band above the box, blue-gray band through the eyes, skin elsewhere.
fn frame() -> Frame {
    Frame::from_fn(400, 400, |_, y| match y {
        0..=99 => [220, 190, 120],
        150..=189 => [60, 90, 110],
        _ => [200, 160, 140],
    })
}

#[test]
fn forehead_and_jaw_ratios_end_to_end() {
    let det = face();
    let m = FaceMetrics::from_shape(&det.bbox, &det.landmarks).unwrap();
    assert!((m.forehead_ratio - 0.25).abs() < 1e-6);
    assert!((m.jaw_ratio - 0.60).abs() < 1e-6);

    let record = Analyzer::default().analyze(&det, &frame()).unwrap();
    assert_eq!(record.forehead.label, ForeheadHeight::Balanced);
    assert_eq!(record.jaw.label, JawWidth::Narrow);
}

#[test]
fn full_record() {
    let record = Analyzer::default().analyze(&face(), &frame()).unwrap();

    assert_eq!(record.eye_color.label, EyeColor::Blue);
    assert_eq!(record.hair_color.label, HairColor::Blond);
    assert_eq!(record.symmetry.label, Symmetry::VerySymmetric);
    assert!((record.symmetry.metric - 1.0).abs() < 1e-6);
    // Brows 190 wide over a 150 jaw
    assert_eq!(record.face_shape.label, FaceShape::Heart);
    assert_eq!(record.age_profile.label, AgeBracket::From40To54);
    assert!(record.age_profile.detail.starts_with("Estimated 47 years, male."));
}

#[test]
fn composed_text_is_reproducible() {
    let record = Analyzer::default().analyze(&face(), &frame()).unwrap();
    let a = Composer::seeded(99).compose(&record);
    let b = Composer::seeded(99).compose(&record);
    assert_eq!(a, b);
    assert!(a.text.contains(&format!("Try a {}.", a.style)));
}

#[test]
fn forehead_boundaries_are_balanced() {
    let band = Config::default().thresholds.forehead;
    assert_eq!(classify_forehead(0.30, &band), ForeheadHeight::Balanced);
    assert_eq!(classify_forehead(0.23, &band), ForeheadHeight::Balanced);
    assert_eq!(classify_forehead(0.301, &band), ForeheadHeight::High);
    assert_eq!(classify_forehead(0.229, &band), ForeheadHeight::Low);
}

#[test]
fn custom_jaw_band() {
    let band = Band::new(0.5, 0.55);
    assert_eq!(classify_jaw(0.60, &band), JawWidth::Wide);
}

#[tokio::test(start_paused = true)]
async fn session_over_files_on_disk() {
    let dir = std::env::temp_dir().join("face_stylist_pipeline_session");
    std::fs::create_dir_all(&dir).unwrap();

    let blank = dir.join("blank.png");
    let portrait = dir.join("portrait.png");
    image::RgbImage::from_pixel(400, 400, image::Rgb([30, 30, 30])).save(&blank).unwrap();
    let f = frame();
    image::RgbImage::from_fn(400, 400, |x, y| {
        let [r, g, b] = face_stylist::PixelAccess::get_pixel(&f, x, y).unwrap();
        image::Rgb([r, g, b])
    })
    .save(&portrait)
    .unwrap();

    let detections = dir.join("detections.json");
    let recording = vec![None, Some(face())];
    std::fs::write(&detections, serde_json::to_string(&recording).unwrap()).unwrap();

    let camera = ImageSequenceCamera::from_paths([&blank, &portrait]);
    let detector = ReplayDetector::load(&detections).unwrap();
    let mut session = CaptureSession::new(Config::default(), camera, detector)
        .unwrap()
        .with_composer(Composer::seeded(5));

    let analysis = session.run().await.unwrap().unwrap();
    assert_eq!(analysis.features.forehead.label, ForeheadHeight::Balanced);
    assert_eq!(analysis.features.eye_color.label, EyeColor::Blue);
    assert_eq!(session.detector().calls(), 2);
    assert!(!session.camera().is_active());

    std::fs::remove_dir_all(dir).ok();
}

fn point() -> impl Strategy<Value = Point> {
    (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| Point::new(x, y))
}

#[test]
fn symmetry_score_stays_in_unit_interval() {
    proptest!(|(
        points in prop::collection::vec(point(), NUM_LANDMARKS),
        x in -500.0f32..500.0,
        y in -500.0f32..500.0,
        w in 0.0f32..1000.0,
        h in 0.0f32..1000.0
    )| {
        let score = symmetry_score(&BoundingBox::new(x, y, w, h), &Shape::new(points));
        prop_assert!((0.0..=1.0).contains(&score));
    });
}

#[test]
fn every_color_gets_an_eye_label() {
    let t = Config::default().thresholds.eye_color;
    proptest!(|(r in 0.0f32..=255.0, g in 0.0f32..=255.0, b in 0.0f32..=255.0)| {
        let label = classify_eye_color(&Rgb::new(r, g, b), &t);
        prop_assert_ne!(label, EyeColor::Unknown);
    });
}

#[test]
fn face_shape_classification_is_stable() {
    let t = Config::default().thresholds.face_shape;
    proptest!(|(points in prop::collection::vec(point(), NUM_LANDMARKS), w in 1.0f32..1000.0, h in 1.0f32..1000.0)| {
        let bbox = BoundingBox::new(0.0, 0.0, w, h);
        let m = FaceMetrics::from_shape(&bbox, &Shape::new(points)).unwrap();
        prop_assert_eq!(classify_face_shape(&m, &t), classify_face_shape(&m, &t));
    });
}
