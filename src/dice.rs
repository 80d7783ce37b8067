//! Tactical dice: `NdS[+/-M]` parsing and rolling.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};

const MAX_DICE: u32 = 100;
const ALLOWED_SIDES: [u32; 7] = [4, 6, 8, 10, 12, 20, 100];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollSpec {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl fmt::Display for RollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.modifier > 0 {
            write!(f, "+{}", self.modifier)?;
        } else if self.modifier < 0 {
            write!(f, "{}", self.modifier)?;
        }
        Ok(())
    }
}

impl FromStr for RollSpec {
    type Err = anyhow::Error;

    /// Accepts `d20`, `2d6`, `3d8+2`, `d10-1`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        let (dice, modifier) = match s.find(['+', '-']) {
            Some(i) => {
                let m: i32 = s[i..]
                    .parse()
                    .map_err(|_| anyhow!("bad modifier in {:?}", s))?;
                (&s[..i], m)
            }
            None => (s.as_str(), 0),
        };

        let (count, sides) = match dice.split_once('d') {
            Some(("", sides)) => (1, sides),
            Some((count, sides)) => (
                count
                    .parse()
                    .map_err(|_| anyhow!("bad dice count in {:?}", s))?,
                sides,
            ),
            None => bail!("expected NdS, e.g. 2d20 (got {:?})", s),
        };
        let sides: u32 = sides
            .parse()
            .map_err(|_| anyhow!("bad die size in {:?}", s))?;

        if count == 0 || count > MAX_DICE {
            bail!("dice count must be 1..={}", MAX_DICE);
        }
        if !ALLOWED_SIDES.contains(&sides) {
            bail!("unsupported die d{} (use d4/d6/d8/d10/d12/d20/d100)", sides);
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }
}

#[derive(Clone, Debug)]
pub struct RollResult {
    pub spec: RollSpec,
    pub rolls: Vec<u32>,
    pub total: i64,
}

pub fn roll(spec: RollSpec) -> Result<RollResult> {
    let mut rolls = Vec::with_capacity(spec.count as usize);
    for _ in 0..spec.count {
        rolls.push(roll_die(spec.sides)?);
    }
    let total = rolls.iter().map(|&r| i64::from(r)).sum::<i64>() + i64::from(spec.modifier);
    Ok(RollResult { spec, rolls, total })
}

fn roll_die(sides: u32) -> Result<u32> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow!("getrandom: {:?}", e))?;
    let raw = u64::from_le_bytes(bytes);
    Ok((raw % u64::from(sides)) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_forms() {
        assert_eq!(
            "d20".parse::<RollSpec>().unwrap(),
            RollSpec {
                count: 1,
                sides: 20,
                modifier: 0
            }
        );
        assert_eq!(
            "3d8+2".parse::<RollSpec>().unwrap(),
            RollSpec {
                count: 3,
                sides: 8,
                modifier: 2
            }
        );
        assert_eq!(
            "2D6-1".parse::<RollSpec>().unwrap(),
            RollSpec {
                count: 2,
                sides: 6,
                modifier: -1
            }
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<RollSpec>().is_err());
        assert!("20".parse::<RollSpec>().is_err());
        assert!("0d6".parse::<RollSpec>().is_err());
        assert!("2d7".parse::<RollSpec>().is_err());
        assert!("2d6++1".parse::<RollSpec>().is_err());
    }

    #[test]
    fn rolls_stay_in_range_and_sum() {
        let spec: RollSpec = "10d6+3".parse().unwrap();
        let result = roll(spec).unwrap();
        assert_eq!(result.rolls.len(), 10);
        assert!(result.rolls.iter().all(|&r| (1..=6).contains(&r)));
        let sum: i64 = result.rolls.iter().map(|&r| i64::from(r)).sum();
        assert_eq!(result.total, sum + 3);
    }

    #[test]
    fn display_round_trips() {
        for s in ["1d20", "3d8+2", "2d6-1"] {
            let spec: RollSpec = s.parse().unwrap();
            assert_eq!(spec.to_string(), s);
        }
    }
}
