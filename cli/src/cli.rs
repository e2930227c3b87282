//! Running a world from the command line.

use crate::args::{Args, Format, Source};
use lifegrid_lib::{Config, RleDecoder, Rule, World};
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::{error::Error, fs, path::Path};

/// Parses a configuration file, in a format chosen by its extension.
///
/// Files without a known extension are read as TOML.
fn parse_config(text: &str, extension: Option<&str>) -> Result<Config, Box<dyn Error>> {
    let config = match extension {
        Some("json") => serde_json::from_str(text)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(text)?,
        _ => toml::from_str(text)?,
    };
    Ok(config)
}

/// Builds the configuration from the configuration file, if any,
/// and the command-line options, which take precedence.
fn config(args: &Args) -> Result<Config, Box<dyn Error>> {
    let mut config = match &args.config_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            let extension = path.extension().and_then(|e| e.to_str());
            parse_config(&text, extension)?
        }
        None => Config::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(rule_string) = &args.rule_string {
        config.rule_string = rule_string.clone();
    }
    debug!("{:?}", config);
    Ok(config)
}

/// Fills the world from the chosen source.
fn populate(world: &mut World, args: &Args) -> Result<(), Box<dyn Error>> {
    let pattern = match &args.source {
        Source::Empty => return Ok(()),
        Source::Random(seed) => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy(),
            };
            world.randomize_with(&mut rng);
            info!("Filled the grid at random, population {}", world.population());
            return Ok(());
        }
        Source::Preset(preset) => preset.pattern(),
        Source::File(path) => {
            let text = read_pattern(path)?;
            RleDecoder::new().lenient(args.lenient).decode(&text)?
        }
    };

    if let Some(rule) = pattern.rule() {
        if rule.parse::<Rule>().ok() != Some(world.rule()) {
            warn!(
                "The pattern was written for {}, running it under {}",
                rule,
                world.rule()
            );
        }
    }

    let (x, y) = match args.origin {
        Some((x, y)) => {
            world.load_pattern(&pattern, x, y);
            (x, y)
        }
        None => world.load_pattern_centered(&pattern),
    };
    info!(
        "Loaded a {}x{} pattern at ({}, {}), population {}",
        pattern.width(),
        pattern.height(),
        x,
        y,
        world.population()
    );
    Ok(())
}

fn read_pattern(path: &Path) -> Result<String, Box<dyn Error>> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e).into())
}

/// Builds the world, runs it, and renders the last generation.
pub(crate) fn run(args: &Args) -> Result<String, Box<dyn Error>> {
    let mut world = config(args)?.world()?;
    populate(&mut world, args)?;
    world.step_n(args.generations);
    info!(
        "Generation {}, population {}",
        world.generation(),
        world.population()
    );
    let output = match args.format {
        Format::Plaintext => world.to_string(),
        Format::Rle => world.to_pattern().to_rle(),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid_lib::Preset;

    fn args(source: Source) -> Args {
        Args {
            config_file: None,
            width: Some(8),
            height: Some(6),
            rule_string: None,
            source,
            origin: None,
            lenient: false,
            generations: 0,
            format: Format::Plaintext,
            verbose: 0,
        }
    }

    #[test]
    fn config_formats() -> Result<(), Box<dyn Error>> {
        let expected = Config::new(10, 20).set_rule_string("B36/S23");
        let toml = "width = 10\nheight = 20\nrule_string = \"B36/S23\"\n";
        assert_eq!(parse_config(toml, Some("toml"))?, expected);
        assert_eq!(parse_config(toml, None)?, expected);
        let json = r#"{"width": 10, "height": 20, "rule_string": "B36/S23"}"#;
        assert_eq!(parse_config(json, Some("json"))?, expected);
        let yaml = "width: 10\nheight: 20\nrule_string: B36/S23\n";
        assert_eq!(parse_config(yaml, Some("yaml"))?, expected);
        Ok(())
    }

    #[test]
    fn missing_fields_use_defaults() -> Result<(), Box<dyn Error>> {
        let config = parse_config("width = 12\n", Some("toml"))?;
        assert_eq!(config, Config { width: 12, ..Config::default() });
        Ok(())
    }

    #[test]
    fn options_override_defaults() -> Result<(), Box<dyn Error>> {
        let mut args = args(Source::Empty);
        args.rule_string = Some(String::from("B2/S"));
        let config = config(&args)?;
        assert_eq!(config, Config::new(8, 6).set_rule_string("B2/S"));
        Ok(())
    }

    #[test]
    fn run_preset() -> Result<(), Box<dyn Error>> {
        let mut args = args(Source::Preset(Preset::Glider));
        args.origin = Some((0, 0));
        args.generations = 4;
        let output = run(&args)?;
        let expected = "\
            ........\n\
            ..o.....\n\
            ...o....\n\
            .ooo....\n\
            ........\n\
            ........\n";
        assert_eq!(output, expected);
        Ok(())
    }

    #[test]
    fn run_random_rle() -> Result<(), Box<dyn Error>> {
        let mut args = args(Source::Random(Some(3)));
        args.format = Format::Rle;
        let first = run(&args)?;
        assert!(first.starts_with("x = 8, y = 6, rule = B3/S23\n"));
        assert_eq!(run(&args)?, first);
        Ok(())
    }

    #[test]
    fn invalid_size() {
        let mut args = args(Source::Empty);
        args.width = Some(0);
        assert!(run(&args).is_err());
    }
}
