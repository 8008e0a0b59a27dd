use crate::data::Mode;
use std::path::PathBuf;

pub(crate) const USAGE: &str = "usage: sales-tally [--branch-only] <directory>";

/// What a run works on, taken from the command line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Config {
    pub dir: PathBuf,
    pub mode: Mode,
}

impl Config {
    /// Parses the arguments following the program name.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, anyhow::Error> {
        let mut mode = Mode::default();
        let mut dir = None;
        for arg in args {
            match arg.as_str() {
                "--branch-only" => mode = Mode::BranchOnly,
                flag if flag.starts_with("--") => anyhow::bail!("unknown option {flag}"),
                _ if dir.is_some() => anyhow::bail!("more than one directory given"),
                _ => dir = Some(PathBuf::from(&arg)),
            }
        }
        let dir = dir.ok_or_else(|| anyhow::anyhow!("no directory given"))?;
        Ok(Self { dir, mode })
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::data::Mode;

    fn parse(args: &[&str]) -> Result<Config, anyhow::Error> {
        Config::from_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn directory_only() {
        assert_eq!(
            parse(&["/tmp/sales"]).unwrap(),
            Config {
                dir: "/tmp/sales".into(),
                mode: Mode::Dual,
            }
        );
    }

    #[test]
    fn branch_only() {
        assert_eq!(parse(&["--branch-only", "sales"]).unwrap().mode, Mode::BranchOnly);
        assert_eq!(parse(&["sales", "--branch-only"]).unwrap().mode, Mode::BranchOnly);
    }

    #[test]
    fn bad_arguments() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a", "b"]).is_err());
        assert!(parse(&["--verbose", "a"]).is_err());
        assert!(parse(&["--branch-only"]).is_err());
    }
}
