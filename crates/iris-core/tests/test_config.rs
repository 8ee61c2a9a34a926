use iris_core::config::{UrlSource, ViewerConfig, Visibility};
use iris_core::source::{build_items, changed_positions, SourceImage};

// ---------------------------------------------------------------------------
// Defaults and derived values
// ---------------------------------------------------------------------------

#[test]
fn test_defaults() {
    let config = ViewerConfig::default();
    assert!(!config.inline);
    assert!(config.movable && config.zoomable && config.rotatable && config.scalable);
    assert!(config.transition && config.fullscreen && config.keyboard);
    assert_eq!(config.interval, 5000);
    assert_eq!(config.zoom_ratio, 0.1);
    assert_eq!(config.zoom_bounds(), (0.01, 100.0));
    assert_eq!(config.navbar, Visibility::Visible);
    assert_eq!(config.effective_z_index(), 2015);
}

#[test]
fn test_zoom_bounds_never_exceed_global_limits() {
    let config = ViewerConfig {
        min_zoom_ratio: 0.001,
        max_zoom_ratio: 500.0,
        ..ViewerConfig::default()
    };
    assert_eq!(config.zoom_bounds(), (0.01, 100.0));
}

#[test]
fn test_wheel_step_fallback() {
    for zoom_ratio in [0.0, f64::NAN, f64::INFINITY] {
        let config = ViewerConfig {
            zoom_ratio,
            ..ViewerConfig::default()
        };
        assert_eq!(config.wheel_step(), 0.1);
    }
    let config = ViewerConfig {
        zoom_ratio: 0.25,
        ..ViewerConfig::default()
    };
    assert_eq!(config.wheel_step(), 0.25);
}

#[test]
fn test_inline_z_index() {
    let config = ViewerConfig {
        inline: true,
        z_index_inline: 7,
        ..ViewerConfig::default()
    };
    assert_eq!(config.effective_z_index(), 7);
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_partial_config_from_json() {
    let json = r#"{ "inline": true, "navbar": 2, "title": false, "interval": 0 }"#;
    let config: ViewerConfig = serde_json::from_str(json).unwrap();
    assert!(config.inline);
    assert_eq!(config.navbar, Visibility::HiddenXsDown);
    assert_eq!(config.title, Visibility::Hidden);
    assert_eq!(config.interval, 0);
    assert_eq!(config.toolbar, Visibility::Visible);
    assert_eq!(config.max_zoom_ratio, 100.0);
}

#[test]
fn test_visibility_accepts_bool_and_breakpoints() {
    let parse = |s: &str| serde_json::from_str::<Visibility>(s);
    assert_eq!(parse("true").unwrap(), Visibility::Visible);
    assert_eq!(parse("false").unwrap(), Visibility::Hidden);
    assert_eq!(parse("3").unwrap(), Visibility::HiddenSmDown);
    assert_eq!(parse("4").unwrap(), Visibility::HiddenMdDown);
    assert!(parse("5").is_err());
    assert!(parse("\"yes\"").is_err());
}

#[test]
fn test_visibility_serializes_like_it_parses() {
    assert_eq!(serde_json::to_string(&Visibility::Hidden).unwrap(), "false");
    assert_eq!(serde_json::to_string(&Visibility::HiddenSmDown).unwrap(), "3");
}

#[test]
fn test_visibility_classes() {
    assert_eq!(Visibility::Visible.class_name(), None);
    assert_eq!(Visibility::Hidden.class_name(), Some("viewer-hide"));
    assert_eq!(Visibility::HiddenMdDown.class_name(), Some("viewer-hide-md-down"));
    assert!(Visibility::HiddenXsDown.is_enabled());
    assert!(!Visibility::Hidden.is_enabled());
    assert_eq!(Visibility::HiddenXsDown.to_string(), "hidden below sm");
}

#[test]
fn test_url_source_from_json() {
    let config: ViewerConfig = serde_json::from_str(r#"{ "url": { "attribute": "data-original" } }"#).unwrap();
    assert!(matches!(config.url, UrlSource::Attribute(ref name) if name == "data-original"));

    let config: ViewerConfig = serde_json::from_str(r#"{ "url": "src" }"#).unwrap();
    assert!(matches!(config.url, UrlSource::Src));
}

#[test]
fn test_default_config_serializes() {
    let json = serde_json::to_string(&ViewerConfig::default()).unwrap();
    let back: ViewerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.z_index, 2015);
    assert_eq!(back.button, Visibility::Visible);
}

// ---------------------------------------------------------------------------
// Image list
// ---------------------------------------------------------------------------

#[test]
fn test_build_items_alt_defaults_to_file_name() {
    let images = vec![
        SourceImage::new("photos/tulips.jpg?w=200"),
        SourceImage::new("photos/roses.jpg").with_alt("Roses"),
        SourceImage::new("photos/daisies.jpg").with_alt(""),
    ];
    let items = build_items(&images, &UrlSource::Src);
    let alts: Vec<&str> = items.iter().map(|i| i.alt.as_str()).collect();
    assert_eq!(alts, vec!["tulips.jpg", "Roses", "daisies.jpg"]);
    assert_eq!(items[0].original_url, "photos/tulips.jpg?w=200");
}

#[test]
fn test_build_items_attribute_url() {
    let images = vec![
        SourceImage::new("thumb/a.jpg").with_attribute("data-original", "full/a.jpg"),
        SourceImage::new("thumb/b.jpg"),
        SourceImage::default().with_attribute("data-original", "full/c.jpg"),
    ];
    let items = build_items(&images, &UrlSource::Attribute("data-original".into()));

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].src, "thumb/a.jpg");
    assert_eq!(items[0].original_url, "full/a.jpg");
    assert_eq!(items[1].original_url, "thumb/b.jpg");
    assert_eq!(items[2].src, "full/c.jpg");
}

#[test]
fn test_build_items_resolver() {
    let url = UrlSource::resolver(|image: &SourceImage| image.src.as_ref().map(|s| s.replace("thumb", "full")));
    let items = build_items(&[SourceImage::new("thumb/a.jpg")], &url);
    assert_eq!(items[0].original_url, "full/a.jpg");
    assert_eq!(format!("{url:?}"), "Resolver(..)");
}

#[test]
fn test_build_items_skips_unusable_sources() {
    let images = vec![SourceImage::default(), SourceImage::new("")];
    assert!(build_items(&images, &UrlSource::Src).is_empty());
}

#[test]
fn test_changed_positions() {
    let old = build_items(
        &[SourceImage::new("a"), SourceImage::new("b"), SourceImage::new("c")],
        &UrlSource::Src,
    );
    let new = build_items(&[SourceImage::new("a"), SourceImage::new("x")], &UrlSource::Src);
    assert_eq!(changed_positions(&old, &new), vec![1, 2]);
    assert!(changed_positions(&new, &new).is_empty());
}
