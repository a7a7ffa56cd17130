use std::io::Write;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_document_yields_defaults() {
	assert_eq!(PoiConfig::parse("").unwrap(), PoiConfig::default());
}

#[test]
fn partial_document_overrides_named_fields() {
	let config = PoiConfig::parse(
		r#"
tolerance = 0.0005
tenth_point_count = 20

[layout]
tendons = false
"#,
	)
	.unwrap();
	assert_eq!(config.tolerance, 0.0005);
	assert_eq!(config.tenth_point_count, 20);
	assert!(!config.layout.tendons);
	assert!(config.layout.span_points);
	assert_eq!(config.harp_point_offset, 0.0015);
}

#[test]
fn unknown_fields_are_rejected() {
	assert!(matches!(PoiConfig::parse("tolerence = 0.001"), Err(ConfigError::Parse(_))));
	assert!(matches!(PoiConfig::parse("[layout]\nbogus = true"), Err(ConfigError::Parse(_))));
}

#[test]
fn out_of_range_values_are_rejected() {
	let err = PoiConfig::parse("tolerance = 0.0").unwrap_err();
	assert!(matches!(err, ConfigError::Invalid { field: "tolerance", .. }));

	let err = PoiConfig::parse("tenth_point_count = 0").unwrap_err();
	assert!(matches!(err, ConfigError::Invalid { field: "tenth_point_count", .. }));

	let err = PoiConfig::parse("harp_point_offset = 0.0005").unwrap_err();
	assert!(matches!(err, ConfigError::Invalid { field: "harp_point_offset", .. }));
}

#[test]
fn load_reads_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("poi.toml");
	let mut file = std::fs::File::create(&path).unwrap();
	writeln!(file, "background_invalidation = false").unwrap();
	drop(file);

	let config = PoiConfig::load(&path).unwrap();
	assert!(!config.background_invalidation);
}

#[test]
fn load_reports_missing_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("missing.toml");
	match PoiConfig::load(&path) {
		Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
		other => panic!("expected I/O error, got {other:?}"),
	}
}
