use std::path::PathBuf;

use crate::{AppErr, Result};

pub const USAGE: &str =
    "usage: league-search <train.csv | snapshot.json> <test.csv> [--config search.json] [--seed N]";

/// Where the network to test comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// A player file to search a network for.
    Train(PathBuf),
    /// A previously saved `ModelSnapshot`.
    Snapshot(PathBuf),
}

impl ModelSource {
    fn from_path(path: PathBuf) -> Self {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::Snapshot(path)
        } else {
            Self::Train(path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub model: ModelSource,
    pub test: PathBuf,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Args {
    /// Parses the command line arguments, program name excluded.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut positional = Vec::new();
        let mut config = None;
        let mut seed = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or_else(|| usage("--config needs a path"))?;
                    config = Some(PathBuf::from(path));
                }
                "--seed" => {
                    let raw = args.next().ok_or_else(|| usage("--seed needs a value"))?;
                    let value = raw
                        .parse::<u64>()
                        .map_err(|_| usage(&format!("invalid seed {raw:?}")))?;
                    seed = Some(value);
                }
                flag if flag.starts_with("--") => {
                    return Err(usage(&format!("unknown option {flag}")));
                }
                _ => positional.push(PathBuf::from(arg)),
            }
        }

        let mut positional = positional.into_iter();
        let (Some(model), Some(test), None) =
            (positional.next(), positional.next(), positional.next())
        else {
            return Err(usage("expected a training set or snapshot and a test set"));
        };

        Ok(Self {
            model: ModelSource::from_path(model),
            test,
            config,
            seed,
        })
    }
}

fn usage(msg: &str) -> AppErr {
    AppErr::Usage(format!("{msg}\n{USAGE}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn trains_from_csv() {
        let args = parse(&["train.csv", "test.csv"]).unwrap();
        assert_eq!(args.model, ModelSource::Train("train.csv".into()));
        assert_eq!(args.test, PathBuf::from("test.csv"));
        assert_eq!(args.config, None);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn loads_json_snapshots() {
        let args = parse(&["--seed", "7", "network.JSON", "test.csv"]).unwrap();
        assert_eq!(args.model, ModelSource::Snapshot("network.JSON".into()));
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn reads_the_config_path() {
        let args = parse(&["a.csv", "b.csv", "--config", "search.json"]).unwrap();
        assert_eq!(args.config, Some("search.json".into()));
    }

    #[test]
    fn rejects_bad_invocations() {
        assert!(matches!(parse(&["a.csv"]), Err(AppErr::Usage(_))));
        assert!(parse(&["a.csv", "b.csv", "c.csv"]).is_err());
        assert!(parse(&["a.csv", "b.csv", "--seed", "x"]).is_err());
        assert!(parse(&["a.csv", "b.csv", "--config"]).is_err());
        assert!(parse(&["a.csv", "b.csv", "--verbose"]).is_err());
    }
}
