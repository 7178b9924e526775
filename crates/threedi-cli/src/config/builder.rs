use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::{EncoderArgs, OutputFormat};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::parser;
use clap::ValueEnum;
use std::path::PathBuf;
use threedi::core::geometry::VirtualCenterParams;
use threedi::engine::config::EncoderConfigBuilder;

/// Merges CLI flags, `--set` overrides, the config file and defaults.
///
/// `codebook`, `unknown_char` and `format` are the command-specific flags;
/// commands that do not have them pass `None`.
pub fn build_config(
    args: &EncoderArgs,
    codebook: Option<&str>,
    unknown_char: Option<char>,
    format: Option<OutputFormat>,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let codebook_file = file_config.codebook.take().unwrap_or_default();
    let codebook = codebook
        .map(str::to_string)
        .or(codebook_file.path)
        .unwrap_or(defaults.codebook);
    let unknown_char = unknown_char.or(codebook_file.unknown_char);

    let partners_file = file_config.partners.take().unwrap_or_default();
    let partner_strategy = args
        .partner_strategy
        .or(partners_file.strategy)
        .unwrap_or(defaults.partner_strategy);
    let sequence_exclusion = args
        .sequence_exclusion
        .or(partners_file.sequence_exclusion)
        .unwrap_or(defaults.sequence_exclusion);

    let vc_file = file_config.virtual_center.take().unwrap_or_default();
    let reference = VirtualCenterParams::REFERENCE;
    let virtual_center = VirtualCenterParams {
        alpha_degrees: vc_file.alpha_degrees.unwrap_or(reference.alpha_degrees),
        beta_degrees: vc_file.beta_degrees.unwrap_or(reference.beta_degrees),
        distance: vc_file.distance.unwrap_or(reference.distance),
    };

    let format = format
        .or(file_config.output.take().and_then(|o| o.format))
        .unwrap_or(defaults.format);

    let encoder = EncoderConfigBuilder::new()
        .virtual_center(virtual_center)
        .partner_strategy(partner_strategy)
        .sequence_exclusion(sequence_exclusion)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        codebook,
        unknown_char,
        format,
        encoder,
    })
}

/// Turns a codebook path or logical name into a manifest path.
pub fn resolve_codebook_path(name_or_path: &str, data_manager: &DataManager) -> Result<PathBuf> {
    if parser::looks_like_path(name_or_path) {
        return Ok(PathBuf::from(name_or_path));
    }
    let parsed =
        parser::parse_codebook_name(name_or_path).map_err(|e| CliError::Argument(e.to_string()))?;
    Ok(data_manager.resolve_codebook(&parsed))
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "codebook.path" => {
                config.codebook.get_or_insert_with(Default::default).path =
                    Some(value_str.to_string());
            }
            "codebook.unknown-char" => {
                config
                    .codebook
                    .get_or_insert_with(Default::default)
                    .unknown_char = Some(parse_value(key, value_str, "character")?);
            }
            "partners.strategy" => {
                config.partners.get_or_insert_with(Default::default).strategy = Some(
                    parser::parse_partner_strategy(value_str)
                        .map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "partners.sequence-exclusion" => {
                config
                    .partners
                    .get_or_insert_with(Default::default)
                    .sequence_exclusion = Some(parse_value(key, value_str, "integer")?);
            }
            "virtual-center.alpha-degrees" => {
                config
                    .virtual_center
                    .get_or_insert_with(Default::default)
                    .alpha_degrees = Some(parse_value(key, value_str, "float")?);
            }
            "virtual-center.beta-degrees" => {
                config
                    .virtual_center
                    .get_or_insert_with(Default::default)
                    .beta_degrees = Some(parse_value(key, value_str, "float")?);
            }
            "virtual-center.distance" => {
                config
                    .virtual_center
                    .get_or_insert_with(Default::default)
                    .distance = Some(parse_value(key, value_str, "float")?);
            }
            "output.format" => {
                config.output.get_or_insert_with(Default::default).format = Some(
                    OutputFormat::from_str(value_str, true).map_err(|_| {
                        CliError::Config(format!("Invalid format for {}: {}", key, value_str))
                    })?,
                );
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use threedi::engine::config::{EncoderConfig, PartnerStrategy};

    fn args_with_config(path: Option<PathBuf>) -> EncoderArgs {
        EncoderArgs {
            config: path,
            ..EncoderArgs::default()
        }
    }

    #[test]
    fn defaults_reproduce_reference_encoder() {
        let app = build_config(&EncoderArgs::default(), None, None, None).unwrap();
        assert_eq!(app.codebook, "3di");
        assert_eq!(app.unknown_char, None);
        assert_eq!(app.format, OutputFormat::Fasta);
        assert_eq!(app.encoder, EncoderConfig::default());
    }

    #[test]
    fn file_values_are_used_when_flags_are_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("threedi.toml");
        fs::write(
            &path,
            r#"
            [codebook]
            path = "./models/codebook.toml"
            unknown-char = "X"
            [partners]
            strategy = "brute-force"
            sequence-exclusion = 1
            [virtual-center]
            distance = 1.5
            [output]
            format = "tsv"
            "#,
        )
        .unwrap();

        let app = build_config(&args_with_config(Some(path)), None, None, None).unwrap();
        assert_eq!(app.codebook, "./models/codebook.toml");
        assert_eq!(app.unknown_char, Some('X'));
        assert_eq!(app.format, OutputFormat::Tsv);
        assert_eq!(app.encoder.partner_strategy, PartnerStrategy::BruteForce);
        assert_eq!(app.encoder.sequence_exclusion, 1);
        assert_eq!(app.encoder.virtual_center.distance, 1.5);
        assert_eq!(app.encoder.virtual_center.alpha_degrees, 270.0);
    }

    #[test]
    fn cli_overrides_set_values_which_override_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("threedi.toml");
        fs::write(
            &path,
            "[partners]\nsequence-exclusion = 1\nstrategy = \"brute-force\"\n[output]\nformat = \"tsv\"\n",
        )
        .unwrap();

        let mut args = args_with_config(Some(path));
        args.set_values = vec![
            "partners.sequence-exclusion=3".to_string(),
            "partners.strategy=kd-tree".to_string(),
        ];
        args.partner_strategy = Some(PartnerStrategy::BruteForce);

        let app = build_config(&args, Some("custom"), Some('?'), Some(OutputFormat::Fasta)).unwrap();
        assert_eq!(app.encoder.sequence_exclusion, 3);
        assert_eq!(app.encoder.partner_strategy, PartnerStrategy::BruteForce);
        assert_eq!(app.format, OutputFormat::Fasta);
        assert_eq!(app.codebook, "custom");
        assert_eq!(app.unknown_char, Some('?'));
    }

    #[test]
    fn set_values_cover_virtual_center_and_output() {
        let mut args = EncoderArgs::default();
        args.set_values = vec![
            "virtual-center.alpha-degrees=180".to_string(),
            "virtual-center.beta-degrees=15.5".to_string(),
            "output.format=TSV".to_string(),
            "codebook.unknown-char=X".to_string(),
        ];
        let app = build_config(&args, None, None, None).unwrap();
        assert_eq!(app.encoder.virtual_center.alpha_degrees, 180.0);
        assert_eq!(app.encoder.virtual_center.beta_degrees, 15.5);
        assert_eq!(app.format, OutputFormat::Tsv);
        assert_eq!(app.unknown_char, Some('X'));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in [
            "partners.sequence-exclusion",
            "partners.sequence-exclusion=many",
            "partners.strategy=octree",
            "output.format=xml",
            "scoring.weight=1.0",
        ] {
            let mut args = EncoderArgs::default();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args, None, None, None), Err(CliError::Config(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn invalid_virtual_center_is_a_config_error() {
        let mut args = EncoderArgs::default();
        args.set_values = vec!["virtual-center.distance=-1".to_string()];
        assert!(matches!(
            build_config(&args, None, None, None),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn codebook_paths_and_names_resolve_differently() {
        let dir = tempdir().unwrap();
        let manager = DataManager::with_custom_path(dir.path().to_path_buf());

        let by_path = resolve_codebook_path("./my/codebook.toml", &manager).unwrap();
        assert_eq!(by_path, PathBuf::from("./my/codebook.toml"));

        let by_name = resolve_codebook_path("3di", &manager).unwrap();
        assert_eq!(by_name, dir.path().join("3di").join("codebook.toml"));

        assert!(matches!(
            resolve_codebook_path("bad name", &manager),
            Err(CliError::Argument(_))
        ));
    }
}
