use asset_semver::asset::{AssetType, BowerAssetType, NpmAssetType};
use asset_semver::package::{ConvertOptions, convert_manifest, read_manifest};
use asset_semver::semver::wildcard::{Bound, NumericCore};
use asset_semver::semver::{ComposerGrammar, RepositoryDescriptor, detect, normalize};
use indexmap::IndexMap;
use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

fn convert_version(version: &str) -> String {
    NpmAssetType::new()
        .version_converter()
        .convert_version(version)
        .unwrap()
}

fn convert_range(range: &str) -> String {
    NpmAssetType::new()
        .version_converter()
        .convert_range(range)
        .unwrap()
}

#[rstest]
#[case("1.2.3beta1", "1.2.3-beta1")]
#[case("1.2.3+build.2012", "1.2.3-patch.2012")]
#[case("1.2.3alpha", "1.2.3-alpha1")]
#[case("1.2.3a1", "1.2.3-alpha1")]
#[case("1.2.3rc2", "1.2.3-RC2")]
#[case("1.2.3rc.2", "1.2.3-RC.2")]
#[case("1.2.3+build2012", "1.2.3-patch2012")]
#[case("1.2.3dev", "1.2.3-dev")]
#[case("latest", "*")]
#[case("", "*")]
fn version_conversion_table(#[case] version: &str, #[case] expected: &str) {
    assert_eq!(convert_version(version), expected);
}

#[rstest]
#[case("~1.2.x", ">=1.2.0,<1.3")]
#[case("1.2.3 - 2.3.4", ">=1.2.3,<=2.3.4")]
#[case("~1.2.3", ">=1.2.3,<1.3")]
#[case("~1", ">=1,<1.1")]
#[case("^1.2.3", ">=1.2.3,<2.0")]
#[case("^1.2", ">=1.2,<2.0")]
#[case(">=0.10.x", ">=0.10.0")]
#[case("<=0.10.x", "<=0.10.9999999")]
#[case(">=1.0 <1.1 || >=1.2", ">=1.0,<1.1|>=1.2")]
fn range_conversion_table(#[case] range: &str, #[case] expected: &str) {
    assert_eq!(convert_range(range), expected);
}

#[rstest]
#[case("1.2.3")]
#[case("1.2.3beta")]
#[case("1.2.3-rc.4")]
#[case("1.2.3+build5")]
fn v_prefix_is_preserved(#[case] version: &str) {
    assert_eq!(
        convert_version(&format!("v{}", version)),
        format!("v{}", convert_version(version))
    );
}

#[rstest]
#[case("1.2.3")]
#[case("1.2.3rc2")]
fn v_prefix_case_does_not_matter(#[case] version: &str) {
    let lower = format!("v{}", version);
    let upper = format!("V{}", version);
    assert_eq!(convert_version(&upper), convert_version(&lower));
    assert_eq!(convert_range(&upper), convert_range(&lower));
    assert_ne!(convert_version(&upper), "*");
}

#[test]
fn uppercase_commit_location_is_pinned() {
    let hash = "0A1B2C3D4E5F6A7B8C9D0E1F2A3B4C5D6E7F8A9B";
    let detection = detect(
        &NpmAssetType::new(),
        "lib",
        &format!("git://host/repo.git#{}", hash),
    )
    .unwrap();

    assert_eq!(detection.rewrite.constraint, format!("dev-default#{}", hash));
}

#[rstest]
#[case("~1.99999999999999999999", ">=1.99999999999999999999,<1.100000000000000000000")]
#[case("^18446744073709551615.0", ">=18446744073709551615.0,<18446744073709551616.0")]
#[case("~99999999999999999999.2", ">=99999999999999999999.2,<99999999999999999999.3")]
fn large_components_bump_without_overflow(#[case] range: &str, #[case] expected: &str) {
    assert_eq!(convert_range(range), expected);
}

#[rstest]
#[case("1.2.3")]
#[case("1.2.3beta1")]
#[case("1.2.3-pre")]
#[case("0.10.X")]
#[case("2.0.0+build.7")]
fn normalize_is_idempotent(#[case] version: &str) {
    let grammar = ComposerGrammar::new();
    let once = normalize(version, &grammar).unwrap().to_string();
    let twice = normalize(&once, &grammar).unwrap().to_string();

    assert_eq!(twice, once);
}

#[rstest]
#[case(">=1.0 <1.1 || >=1.2")]
#[case("1.2.3 || >2.0 <=3.x || <0.5")]
#[case(">1 <2 || 4.0.0")]
#[case("=1.0.0")]
fn range_keeps_group_and_term_counts(#[case] range: &str) {
    let expected: Vec<usize> = range
        .split("||")
        .map(|group| group.split_whitespace().count())
        .collect();

    let converted = convert_range(range);
    let actual: Vec<usize> = converted
        .split('|')
        .map(|group| group.split(',').count())
        .collect();

    assert_eq!(actual, expected, "{} -> {}", range, converted);
}

#[rstest]
#[case("1.2.x")]
#[case("1.x.x")]
#[case("1.x.3")]
#[case("x.2.3")]
#[case("0.10.*")]
fn wildcard_bounds_enclose_matching_versions(#[case] pattern: &str) {
    let core = NumericCore::parse(pattern).unwrap();
    let lower = semver::Version::parse(&core.resolve(Bound::Lower).to_string()).unwrap();
    let upper = semver::Version::parse(&core.resolve(Bound::Upper).to_string()).unwrap();

    for sample in [0, 1, 7, 42, 1000] {
        let concrete = pattern
            .split('.')
            .map(|part| match part {
                "x" | "X" | "*" => sample.to_string(),
                number => number.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        let version = semver::Version::parse(&concrete).unwrap();

        assert!(lower <= version, "{} > {}", lower, version);
        assert!(version <= upper, "{} > {}", version, upper);
    }
}

#[test]
fn commit_location_is_pinned() {
    let hash = "0a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b";
    let detection = detect(
        &NpmAssetType::new(),
        "library5",
        &format!("git://host/repo.git#{}", hash),
    )
    .unwrap();

    assert_eq!(detection.rewrite.name, "library5");
    assert_eq!(detection.rewrite.constraint, format!("dev-default#{}", hash));
    assert_eq!(
        detection.repository,
        Some(RepositoryDescriptor {
            repository_type: "npm-vcs".to_string(),
            url: "git://host/repo.git".to_string(),
        })
    );
}

#[test]
fn branch_location_becomes_dev_constraint() {
    let detection = detect(&NpmAssetType::new(), "library6", "git://host/repo.git#branch").unwrap();

    assert_eq!(detection.rewrite.constraint, "dev-branch");
    assert!(detection.repository.is_some());
}

#[rstest]
#[case("git://host/repo.git#1.2.3")]
#[case("https://host/repo.git")]
#[case("git@host:owner/repo.git#~1.0")]
#[case("user@host:repo#feature/x")]
#[case("file:///srv/repo.git#master")]
fn every_location_yields_one_repository(#[case] declared: &str) {
    let detection = detect(&BowerAssetType::new(), "lib", declared).unwrap();

    let repository = detection.repository.unwrap();
    assert_eq!(repository.repository_type, "bower-vcs");
    assert!(declared.starts_with(&repository.url));
}

#[test]
fn detection_serializes_flat() {
    let detection = detect(&BowerAssetType::new(), "lib", "git://host/lib.git#1.0.0").unwrap();

    assert_eq!(
        serde_json::to_value(&detection).unwrap(),
        json!({
            "name": "lib",
            "constraint": "1.0.0",
            "repository": { "type": "bower-vcs", "url": "git://host/lib.git" }
        })
    );
}

#[test]
fn npm_manifest_converts_to_composer_package() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("package.json");
    std::fs::write(
        &path,
        r#"{
            "name": "webapp",
            "version": "2.1.0-beta.3",
            "license": "MIT",
            "main": "dist/index.js",
            "dependencies": {
                "react": "^18.2.0",
                "left-pad": "~1.3.x",
                "forked": "git+https://host/forked.git#fix-build"
            },
            "devDependencies": {
                "jest": ">=29.0 <30.0 || 31.x"
            }
        }"#,
    )
    .unwrap();

    let manifest = read_manifest(&path).unwrap();
    let package = convert_manifest(&NpmAssetType::new(), &manifest, &ConvertOptions::default())
        .unwrap();

    assert_eq!(
        serde_json::to_value(&package).unwrap(),
        json!({
            "name": "npm-asset/webapp",
            "version": "2.1.0-beta.3",
            "license": "MIT",
            "require": {
                "npm-asset/react": ">=18.2.0,<19.0",
                "npm-asset/left-pad": ">=1.3.0,<1.4",
                "npm-asset/forked": "dev-fix-build"
            },
            "require-dev": {
                "npm-asset/jest": ">=29.0,<30.0|31.0"
            },
            "repositories": [
                { "type": "npm-vcs", "url": "git+https://host/forked.git" }
            ],
            "extra": {
                "npm-asset-main": "dist/index.js"
            }
        })
    );
    let names: Vec<&str> = package.require.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["npm-asset/react", "npm-asset/left-pad", "npm-asset/forked"]
    );
}

#[test]
fn bower_manifest_uses_bower_vendor_and_custom_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bower.json");
    std::fs::write(
        &path,
        r#"{
            "name": "widgets",
            "ignore": ["node_modules"],
            "homepage": "https://example.com/widgets",
            "dependencies": { "jquery": ">= 1.9.1" },
            "devDependencies": { "qunit": "~1.14" }
        }"#,
    )
    .unwrap();
    let options = ConvertOptions {
        include_dev_dependencies: false,
        extra_keys: IndexMap::from([("homepage".to_string(), "homepage".to_string())]),
    };

    let manifest = read_manifest(&path).unwrap();
    let package = convert_manifest(&BowerAssetType::new(), &manifest, &options).unwrap();

    assert_eq!(package.name, "bower-asset/widgets");
    assert_eq!(package.require["bower-asset/jquery"], ">=1.9.1");
    assert!(package.require_dev.is_empty());
    assert_eq!(package.extra["bower-asset-ignore"], json!(["node_modules"]));
    assert_eq!(package.extra["homepage"], json!("https://example.com/widgets"));
}

#[test]
fn missing_manifest_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    assert!(read_manifest(&temp_dir.path().join("package.json")).is_err());
}
