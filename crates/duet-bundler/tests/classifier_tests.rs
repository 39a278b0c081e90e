mod helpers;

use duet_bundler::{Classification, ConfigureOptions, DependencyClassifier, configure};
use helpers::AXES;

fn server(mode: &str, light_bundle: Option<bool>) -> duet_bundler::BuildConfiguration {
    let mut options = ConfigureOptions::default();
    options.light_bundle = light_bundle;
    configure("server", mode, &options, "/app").unwrap()
}

#[test]
fn builtins_are_external_on_server() {
    for mode in ["development", "production"] {
        let config = server(mode, None);
        assert_eq!(config.classify("fs"), Classification::External);
        assert_eq!(config.classify("path"), Classification::External);
        assert_eq!(config.classify("node:url"), Classification::External);
    }
}

#[test]
fn relative_paths_always_bundle() {
    for (target, mode) in AXES {
        for light_bundle in [None, Some(true), Some(false)] {
            let mut options = ConfigureOptions::default();
            options.light_bundle = light_bundle;
            let config = configure(target, mode, &options, "/app").unwrap();
            assert_eq!(config.classify("./Component"), Classification::Bundle);
            assert_eq!(config.classify("../shared/Component"), Classification::Bundle);
        }
    }
}

#[test]
fn asset_files_bundle_regardless_of_light_bundle() {
    for light_bundle in [true, false] {
        let config = server("development", Some(light_bundle));
        assert_eq!(config.classify("some-package/icon.svg"), Classification::Bundle);
        assert_eq!(config.classify("bootstrap/dist/css/bootstrap.css"), Classification::Bundle);
    }
}

#[test]
fn unsafe_packages_stay_external_in_full_bundle() {
    let config = server("production", Some(false));
    assert_eq!(config.classify("express"), Classification::External);
    assert_eq!(config.classify("helmet"), Classification::External);
    assert_eq!(config.classify("intl/locale-data/jsonp/en.js"), Classification::External);
    assert_eq!(config.classify("react"), Classification::Bundle);
}

#[test]
fn light_bundle_default_depends_on_mode() {
    assert_eq!(server("development", None).classify("react"), Classification::External);
    assert_eq!(server("production", None).classify("react"), Classification::Bundle);
    assert_eq!(server("production", Some(true)).classify("react"), Classification::External);
    assert_eq!(server("development", Some(false)).classify("react"), Classification::Bundle);
}

#[test]
fn es_module_packages_bundle_in_light_mode() {
    let config = server("development", None);
    assert_eq!(config.classify("lodash-es"), Classification::Bundle);
    assert_eq!(config.classify("lodash"), Classification::External);
}

#[test]
fn client_bundles_everything() {
    let config = configure("client", "development", &ConfigureOptions::default(), "/app").unwrap();
    assert_eq!(config.classify("fs"), Classification::Bundle);
    assert_eq!(config.classify("express"), Classification::Bundle);
    assert_eq!(config.classify(""), Classification::Ignore);
}

#[test]
fn malformed_specifiers_never_panic() {
    let classifier = DependencyClassifier::new(true);
    for specifier in ["", " ", "/", "//", ".", "@", "@/", "a/.svg", "\u{0}", "é/ü.css", "...."] {
        let first = classifier.classify(specifier);
        assert_eq!(first, classifier.classify(specifier));
    }
}

#[test]
fn classifier_is_shareable_across_threads() {
    let config = server("development", None);
    let hook = config.externals.unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert!(hook.resolve("fs").is_some());
                    assert!(hook.resolve("./a").is_none());
                }
            });
        }
    });
}
