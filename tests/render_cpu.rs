use flower_poster::{
    FRESH_COLORS, FillRole, FrameRGBA, PaletteName, Point, PosterRng, RenderConfig, Rgb, render,
    rgb_to_hls,
};

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

fn single_flower() -> RenderConfig {
    RenderConfig {
        n_layers: 1,
        petals: 6,
        size_min: 0.2,
        size_max: 0.2,
        petal_factor_min: 0.3,
        petal_factor_max: 0.3,
        seed: 42,
        palette_name: PaletteName::Fresh,
        gradient_steps: 1,
        alpha_start: 0.2,
        alpha_step: 0.15,
        with_shadow: false,
        ..RenderConfig::default()
    }
}

fn data_to_pixel(frame: &FrameRGBA, p: Point) -> (u32, u32) {
    let x = (p.x * f64::from(frame.width)).floor().clamp(0.0, f64::from(frame.width - 1));
    let y = ((1.0 - p.y) * f64::from(frame.height))
        .floor()
        .clamp(0.0, f64::from(frame.height - 1));
    (x as u32, y as u32)
}

#[test]
fn same_config_renders_identical_pixels() {
    let cfg = RenderConfig::default();
    let a = render(&cfg).unwrap();
    let b = render(&cfg).unwrap();

    assert_eq!(a.preview().width, 600);
    assert_eq!(a.preview().height, 800);
    assert_eq!(digest_u64(&a.preview().data), digest_u64(&b.preview().data));
    assert_eq!(a.preview().data, b.preview().data);
    assert_eq!(a.scene(), b.scene());
}

#[test]
fn different_seeds_render_different_posters() {
    let a = render(&RenderConfig {
        seed: 1,
        ..RenderConfig::default()
    })
    .unwrap();
    let b = render(&RenderConfig {
        seed: 2,
        ..RenderConfig::default()
    })
    .unwrap();
    assert_ne!(a.preview().data, b.preview().data);
}

#[test]
fn zero_layers_is_rejected() {
    let err = render(&RenderConfig {
        n_layers: 0,
        ..RenderConfig::default()
    })
    .unwrap_err();
    assert!(err.is_invalid_config());
}

#[test]
fn inverted_ranges_are_rejected() {
    for cfg in [
        RenderConfig {
            size_min: 0.5,
            size_max: 0.1,
            ..RenderConfig::default()
        },
        RenderConfig {
            petal_factor_min: 0.6,
            petal_factor_max: 0.05,
            ..RenderConfig::default()
        },
        RenderConfig {
            gradient_steps: 0,
            ..RenderConfig::default()
        },
    ] {
        assert!(render(&cfg).unwrap_err().is_invalid_config());
    }
}

#[test]
fn single_flower_scenario() {
    let cfg = single_flower();
    let img = render(&cfg).unwrap();
    let scene = img.scene();

    let fills: Vec<_> = scene.fills().collect();
    assert_eq!(fills.len(), 1);
    let (role, outline, color, alpha) = fills[0];
    assert_eq!(role, FillRole::Body { layer: 0, step: 0 });
    assert!(FRESH_COLORS.contains(&color));
    assert!((alpha - 0.2).abs() < 1e-12);

    let mut rng = PosterRng::new(42);
    let center = Point::new(rng.unit(), rng.unit());
    assert_eq!(outline.center, center);
    assert_eq!(scene.flowers[0].center, center);

    // Far corner stays background, the flower center is tinted.
    let frame = img.preview();
    let bg = cfg.bg_color.to_rgba8();
    let corners = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
    let far = corners
        .iter()
        .copied()
        .max_by(|a, b| {
            let da = (*a - center).hypot();
            let db = (*b - center).hypot();
            da.total_cmp(&db)
        })
        .unwrap();
    let (fx, fy) = data_to_pixel(frame, far);
    assert_eq!(frame.pixel(fx, fy).unwrap(), bg);

    if center.y < 0.85 {
        let (cx, cy) = data_to_pixel(frame, center);
        let px = frame.pixel(cx, cy).unwrap();
        let expected = color.to_rgba8();
        for i in 0..3 {
            let want = 0.8 * f64::from(bg[i]) + 0.2 * f64::from(expected[i]);
            assert!(
                (f64::from(px[i]) - want).abs() <= 3.0,
                "channel {i}: {} vs {want}",
                px[i]
            );
        }
        assert_eq!(px[3], 255);
    }
}

#[test]
fn shadow_fills_come_first_for_each_flower() {
    let img = render(&RenderConfig {
        n_layers: 8,
        with_shadow: true,
        ..RenderConfig::default()
    })
    .unwrap();

    let mut current_layer = None;
    let mut saw_shadow = false;
    for (role, _, color, _) in img.scene().fills() {
        if current_layer != Some(role.layer()) {
            current_layer = Some(role.layer());
            saw_shadow = false;
        }
        match role {
            FillRole::Shadow { .. } => {
                assert_eq!(color, Rgb::BLACK);
                saw_shadow = true;
            }
            FillRole::Body { .. } => assert!(saw_shadow, "body drawn before its shadow"),
        }
    }
}

#[test]
fn fresh_posters_only_use_the_five_colors() {
    for seed in 0..5 {
        let img = render(&RenderConfig {
            n_layers: 12,
            seed,
            ..RenderConfig::default()
        })
        .unwrap();
        for (role, _, color, _) in img.scene().fills() {
            if matches!(role, FillRole::Body { .. }) {
                assert!(FRESH_COLORS.contains(&color), "{color:?}");
            }
        }
    }
}

#[test]
fn dreamy_posters_stay_in_the_blue_purple_band() {
    let img = render(&RenderConfig {
        n_layers: 10,
        palette_name: PaletteName::Dreamy,
        seed: 123,
        ..RenderConfig::default()
    })
    .unwrap();
    assert_eq!(img.scene().palette.len(), 10);
    for c in &img.scene().palette {
        let (h, _, _) = rgb_to_hls(*c);
        assert!((0.70 - 1e-9..=0.85 + 1e-9).contains(&h), "hue {h}");
    }
}

#[test]
fn gradient_copies_shrink_while_alpha_rises() {
    let img = render(&RenderConfig {
        n_layers: 1,
        gradient_steps: 6,
        alpha_start: 0.1,
        alpha_step: 0.1,
        with_shadow: false,
        ..RenderConfig::default()
    })
    .unwrap();

    let bodies: Vec<_> = img.scene().fills().collect();
    assert_eq!(bodies.len(), 6);
    for pair in bodies.windows(2) {
        let (_, a_outline, _, a_alpha) = pair[0];
        let (_, b_outline, _, b_alpha) = pair[1];
        assert!(b_alpha > a_alpha);
        let (a_lo, a_hi) = a_outline.bounds().unwrap();
        let (b_lo, b_hi) = b_outline.bounds().unwrap();
        assert!(b_hi.x - b_lo.x < a_hi.x - a_lo.x);
        assert!(b_hi.y - b_lo.y < a_hi.y - a_lo.y);
    }
}

#[test]
fn renders_on_separate_threads_agree() {
    let cfg = RenderConfig {
        seed: 99,
        n_layers: 4,
        ..RenderConfig::default()
    };
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let cfg = cfg.clone();
            std::thread::spawn(move || render(&cfg).unwrap().preview().data.clone())
        })
        .collect();
    let results: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0], results[1]);
}
