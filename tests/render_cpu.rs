use sunbeam::{Page, Session, WidgetEvent};

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

fn afternoon_session() -> Session {
    Session::new(Page::default().with_slider(70).with_container(80, 140))
        .push(WidgetEvent::SliderInput { value: 71 })
        .push(WidgetEvent::SliderInput { value: 72 })
        .push(WidgetEvent::SliderInput { value: 100 })
        .push(WidgetEvent::ToggleSunshine)
        .push(WidgetEvent::SliderInput { value: 101 })
}

#[test]
fn replayed_rasters_are_deterministic_and_nonempty() {
    let a = afternoon_session().replay().unwrap();
    let b = afternoon_session().replay().unwrap();

    let card_a = a.card_frame();
    let card_b = b.card_frame();
    assert_eq!((card_a.width, card_a.height), (380, 60));
    assert!(card_a.premultiplied);
    assert_eq!(digest_u64(&card_a.data), digest_u64(&card_b.data));
    assert!(card_a.data.chunks_exact(4).all(|px| px[3] == 255));

    let scene_a = a.render_scene().unwrap();
    let scene_b = b.render_scene().unwrap();
    assert_eq!((scene_a.width, scene_a.height), (80, 140));
    assert_eq!(digest_u64(&scene_a.data), digest_u64(&scene_b.data));
    assert!(scene_a.data.iter().any(|&x| x != 0));
}

#[test]
fn cloudy_and_sunny_scenes_differ() {
    let sunny = Session::new(Page::default().with_container(80, 140))
        .replay()
        .unwrap();
    let cloudy = Session::new(Page::default().with_container(80, 140))
        .push(WidgetEvent::ToggleSunshine)
        .replay()
        .unwrap();

    let s = sunny.render_scene().unwrap();
    let c = cloudy.render_scene().unwrap();
    assert_ne!(digest_u64(&s.data), digest_u64(&c.data));
    // The card itself is untouched by the toggle.
    assert_eq!(sunny.card_frame(), cloudy.card_frame());
}
