use anyhow::{Context, bail};
use degen_core::{Coord, Coord2, Difficulty};

pub const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  f <row> <col>   flag or unflag a cell
  n               new game
  d <level>       switch to easy, medium or hard
  h               this help
  q               quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Restart,
    Difficulty(Difficulty),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("type h for help");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(coords(&mut words)?),
            "f" | "flag" => Self::Flag(coords(&mut words)?),
            "n" | "new" | "restart" => Self::Restart,
            "d" | "difficulty" => {
                let level = words.next().context("which difficulty? easy, medium or hard")?;
                Self::Difficulty(level.parse()?)
            }
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}, type h for help"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected {extra:?} after command");
        }
        Ok(command)
    }
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let mut next = |axis: &str| -> anyhow::Result<Coord> {
        let word = words.next().with_context(|| format!("missing {axis}"))?;
        word.parse()
            .with_context(|| format!("{axis} must be a number, got {word:?}"))
    };
    Ok((next("row")?, next("col")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!(Command::parse("r 4 5").unwrap(), Command::Reveal((4, 5)));
        assert_eq!(Command::parse("  FLAG 0 12 ").unwrap(), Command::Flag((0, 12)));
        assert_eq!(Command::parse("n").unwrap(), Command::Restart);
        assert_eq!(
            Command::parse("d hard").unwrap(),
            Command::Difficulty(Difficulty::Hard)
        );
        assert_eq!(Command::parse("q").unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("r 4").is_err());
        assert!(Command::parse("r four 5").is_err());
        assert!(Command::parse("r 4 5 6").is_err());
        assert!(Command::parse("r -1 5").is_err());
        assert!(Command::parse("d insane").is_err());
        assert!(Command::parse("dig 1 1").is_err());
    }
}
