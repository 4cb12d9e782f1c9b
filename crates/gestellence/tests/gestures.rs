use std::time::Duration;

use rayon::prelude::*;

use gestellence::{
    frame::{FrameResult, Presentation},
    hand::{
        gesture::{classify, Gesture, OK_PINCH_DISTANCE},
        landmark::{Finger, LandmarkIdx},
        Hand,
    },
    landmark::Landmark,
    overlay::Overlay,
    replay::load_recording,
};

/// Where a fingertip is placed relative to its PIP joint.
#[derive(Clone, Copy)]
enum Tip {
    Above,
    Below,
}

/// Builds a hand with random landmark positions, then moves the four fingertips above or below
/// their PIP joints as requested.
fn random_hand(rng: &mut fastrand::Rng, tips: [Tip; 4]) -> [Landmark; 21] {
    let mut lms = [Landmark::default(); 21];
    for lm in &mut lms {
        *lm = Landmark::xy(rng.f32(), rng.f32() * 0.5 + 0.25);
    }
    for (finger, tip) in Finger::ALL.into_iter().zip(tips) {
        let pip = lms[finger.pip().index()];
        let offset = 0.01 + rng.f32() * 0.2;
        let y = match tip {
            Tip::Above => pip.y() - offset,
            Tip::Below => pip.y() + offset,
        };
        lms[finger.tip().index()] = Landmark::xy(rng.f32(), y);
    }
    lms
}

fn set(lms: &mut [Landmark; 21], idx: LandmarkIdx, x: f32, y: f32) {
    lms[idx.index()] = Landmark::xy(x, y);
}

const ITERATIONS: usize = 1000;

#[test]
fn all_extended_is_stop() {
    let mut rng = fastrand::Rng::with_seed(1);
    for _ in 0..ITERATIONS {
        let hand = Hand::new(random_hand(&mut rng, [Tip::Above; 4])).unwrap();
        assert_eq!(classify(&hand), Gesture::Stop);
    }
}

#[test]
fn all_curled_is_yes() {
    let mut rng = fastrand::Rng::with_seed(2);
    for _ in 0..ITERATIONS {
        let hand = Hand::new(random_hand(&mut rng, [Tip::Below; 4])).unwrap();
        assert_eq!(classify(&hand), Gesture::Yes);
    }
}

#[test]
fn two_up_two_down_is_no() {
    use Tip::*;
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..ITERATIONS {
        let hand = Hand::new(random_hand(&mut rng, [Above, Above, Below, Below])).unwrap();
        assert_eq!(classify(&hand), Gesture::No);
    }
}

#[test]
fn thumb_and_pinky_up_is_call_me() {
    use Tip::*;
    let mut rng = fastrand::Rng::with_seed(4);
    for _ in 0..ITERATIONS {
        let mut lms = random_hand(&mut rng, [Below, Below, Below, Above]);
        let index_pip = lms[LandmarkIdx::IndexFingerPip.index()];
        set(
            &mut lms,
            LandmarkIdx::ThumbTip,
            rng.f32(),
            index_pip.y() - 0.01 - rng.f32() * 0.2,
        );
        let hand = Hand::new(lms).unwrap();
        assert_eq!(classify(&hand), Gesture::CallMe);
    }
}

#[test]
fn pinch_with_three_up_is_ok() {
    use Tip::*;
    let mut rng = fastrand::Rng::with_seed(5);
    for _ in 0..ITERATIONS {
        // Index curled so that STOP can't match first.
        let mut lms = random_hand(&mut rng, [Below, Above, Above, Above]);
        let index_tip = lms[LandmarkIdx::IndexFingerTip.index()];
        let angle = rng.f32() * std::f32::consts::TAU;
        let dist = rng.f32() * OK_PINCH_DISTANCE as f32 * 0.99;
        set(
            &mut lms,
            LandmarkIdx::ThumbTip,
            index_tip.x() + angle.cos() * dist,
            index_tip.y() + angle.sin() * dist,
        );
        let hand = Hand::new(lms).unwrap();
        assert!(hand.pinch_distance() < OK_PINCH_DISTANCE);
        assert_eq!(classify(&hand), Gesture::Ok);
    }
}

#[test]
fn level_tips_are_unknown() {
    let mut lms = [Landmark::xy(0.5, 0.5); 21];
    set(&mut lms, LandmarkIdx::ThumbTip, 0.9, 0.1);
    assert_eq!(classify(&Hand::new(lms).unwrap()), Gesture::Unknown);
}

#[test]
fn pinch_threshold_boundary() {
    let make = |thumb: (f32, f32), index: (f32, f32)| {
        let mut lms = [Landmark::xy(0.5, 0.5); 21];
        for finger in [Finger::Middle, Finger::Ring, Finger::Pinky] {
            set(&mut lms, finger.tip(), 0.5, 0.2);
        }
        set(&mut lms, LandmarkIdx::IndexFingerTip, index.0, index.1);
        set(&mut lms, LandmarkIdx::ThumbTip, thumb.0, thumb.1);
        Hand::new(lms).unwrap()
    };

    // 0.05f32 is slightly more than 0.05, so this pinch is not under the threshold.
    assert_eq!(classify(&make((0.0, 0.6), (0.05, 0.6))), Gesture::Unknown);
    assert_eq!(classify(&make((0.0, 0.6), (0.0499, 0.6))), Gesture::Ok);
    assert_eq!(classify(&make((0.0, 0.6), (0.0501, 0.6))), Gesture::Unknown);
    assert_eq!(classify(&make((0.25, 0.55), (0.25, 0.6))), Gesture::Unknown);
    assert_eq!(classify(&make((0.25, 0.5501), (0.25, 0.6))), Gesture::Ok);

    // 0.049999998322 apart.
    assert_eq!(
        classify(&make((0.3307537, 0.56057656), (0.3, 0.6))),
        Gesture::Ok
    );
}

#[test]
fn classification_is_deterministic_and_mirror_invariant() {
    let mut rng = fastrand::Rng::with_seed(6);
    for _ in 0..ITERATIONS {
        let lms: Vec<_> = (0..21).map(|_| Landmark::xy(rng.f32(), rng.f32())).collect();
        let hand = Hand::new(lms).unwrap();
        let gesture = classify(&hand);
        assert_eq!(classify(&hand), gesture);
        assert_eq!(classify(&hand.mirrored()), gesture);
    }
}

#[test]
fn parallel_classification_matches_sequential() {
    let mut rng = fastrand::Rng::with_seed(7);
    let hands = (0..ITERATIONS * 10)
        .map(|_| Hand::new((0..21).map(|_| Landmark::xy(rng.f32(), rng.f32()))).unwrap())
        .collect::<Vec<_>>();

    let sequential = hands.iter().map(classify).collect::<Vec<_>>();
    let parallel = hands.par_iter().map(classify).collect::<Vec<_>>();
    assert_eq!(sequential, parallel);
}

#[test]
fn replay_recording() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/poses.csv");
    let frames = load_recording(path, Duration::from_millis(33)).unwrap();

    let captions = |p: Presentation| {
        frames
            .iter()
            .map(|f| f.caption(p).text)
            .collect::<Vec<_>>()
    };
    assert_eq!(
        captions(Presentation::LastHand),
        ["No Hand", "STOP", "YES", "NO", "CALL ME", "OK", "YES"]
    );
    assert_eq!(captions(Presentation::FirstHand)[6], "STOP");
    assert_eq!(captions(Presentation::AllHands)[6], "STOP | YES");
    assert_eq!(frames[6].timestamp_ms(), 198);

    let mut mirrored: FrameResult = frames[4].clone();
    mirrored.mirror();
    assert_eq!(mirrored.caption(Presentation::LastHand).text, "CALL ME");

    let overlay = Overlay::new(&frames[6], 640, 480, Presentation::AllHands);
    assert_eq!(overlay.markers.len(), 42);
}
