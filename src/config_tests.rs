// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `config.rs`

#[cfg(test)]
mod tests {
    use super::super::*;
    use clap::Parser;

    #[test]
    fn test_compatibility_parse_known_values() {
        assert_eq!(
            "kops-dns-controller".parse::<Compatibility>(),
            Ok(Compatibility::KopsDnsController)
        );
        assert_eq!("standard".parse::<Compatibility>(), Ok(Compatibility::Standard));
        assert_eq!("none".parse::<Compatibility>(), Ok(Compatibility::Standard));
    }

    #[test]
    fn test_compatibility_empty_is_standard() {
        assert_eq!("".parse::<Compatibility>(), Ok(Compatibility::Standard));
        assert_eq!("  ".parse::<Compatibility>(), Ok(Compatibility::Standard));
    }

    #[test]
    fn test_compatibility_rejects_typos() {
        let result = "kops-dns-controler".parse::<Compatibility>();
        assert_eq!(
            result,
            Err(SourceError::UnknownCompatibility(
                "kops-dns-controler".to_string()
            ))
        );
    }

    #[test]
    fn test_compatibility_display_round_trips() {
        for mode in [Compatibility::Standard, Compatibility::KopsDnsController] {
            assert_eq!(mode.to_string().parse::<Compatibility>(), Ok(mode));
        }
    }

    #[test]
    fn test_compatibility_default_is_standard() {
        assert_eq!(Compatibility::default(), Compatibility::Standard);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::try_parse_from(["pod-dns-source"]).unwrap();

        assert_eq!(config.namespace, "");
        assert_eq!(config.compatibility, Compatibility::Standard);
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert_eq!(config.cache_sync_timeout(), Duration::from_secs(60));
        assert_eq!(
            config.metrics_bind_address,
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
        assert!(!config.once);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_config_flags() {
        let config = Config::try_parse_from([
            "pod-dns-source",
            "--namespace",
            "kube-system",
            "--compatibility",
            "kops-dns-controller",
            "--interval",
            "15",
            "--cache-sync-timeout",
            "5",
            "--metrics-bind-address",
            "127.0.0.1:9090",
            "--once",
            "--output",
            "yaml",
        ])
        .unwrap();

        assert_eq!(config.namespace, "kube-system");
        assert_eq!(config.compatibility, Compatibility::KopsDnsController);
        assert_eq!(config.interval(), Duration::from_secs(15));
        assert_eq!(config.cache_sync_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.metrics_bind_address,
            "127.0.0.1:9090".parse::<SocketAddr>().unwrap()
        );
        assert!(config.once);
        assert_eq!(config.output, OutputFormat::Yaml);
    }

    #[test]
    fn test_config_rejects_unknown_compatibility() {
        let result = Config::try_parse_from([
            "pod-dns-source",
            "--compatibility",
            "kops",
        ]);

        assert!(result.is_err());
    }
}
