use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compare::Ranking;

/// What one seat put into the pot this hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub name: String,
    pub committed: u32,
    /// Still contesting the pot.
    pub live: bool,
}

/// Chips awarded to one player at settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub player: String,
    pub amount: u32,
}

/// Splits the committed chips among the best-ranked live players.
///
/// The pot is cut into layers at each distinct commitment level. A layer is
/// contested by the live players who committed at least up to it and goes
/// to those among them holding the best rank, split evenly. Odd chips go one
/// at a time to the tied winners in the order `contributions` lists them,
/// which the table passes starting left of the dealer. A layer no live player
/// reached is added to the previous one.
///
/// # Examples
///
/// ```
/// use holdem_engine::payout::{award_pot, Contribution};
/// use holdem_engine::compare::Ranking;
///
/// let contributions = vec![
///     Contribution { name: "ann".into(), committed: 50, live: true },
///     Contribution { name: "bob".into(), committed: 50, live: true },
/// ];
/// let ranking: Ranking = serde_json::from_str(r#"{"ranks":{"ann":1,"bob":2}}"#).unwrap();
/// let awards = award_pot(&contributions, &ranking);
/// assert_eq!(awards[0].player, "ann");
/// assert_eq!(awards[0].amount, 100);
/// ```
pub fn award_pot(contributions: &[Contribution], ranking: &Ranking) -> Vec<Award> {
    let mut levels: Vec<u32> = contributions
        .iter()
        .map(|c| c.committed)
        .filter(|&c| c > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut won: BTreeMap<usize, u32> = BTreeMap::new();
    let mut carried = 0u32;
    let mut floor = 0u32;

    for level in levels {
        let layer: u32 = contributions
            .iter()
            .map(|c| c.committed.min(level).saturating_sub(floor))
            .sum::<u32>()
            + carried;
        floor = level;

        let eligible: Vec<usize> = (0..contributions.len())
            .filter(|&i| contributions[i].live && contributions[i].committed >= level)
            .collect();
        let best = eligible
            .iter()
            .filter_map(|&i| ranking.rank_of(&contributions[i].name))
            .min();
        let Some(best) = best else {
            carried = layer;
            continue;
        };
        carried = 0;

        let winners: Vec<usize> = eligible
            .into_iter()
            .filter(|&i| ranking.rank_of(&contributions[i].name) == Some(best))
            .collect();
        let share = layer / winners.len() as u32;
        let mut odd = layer % winners.len() as u32;
        for i in winners {
            let extra = u32::from(odd > 0);
            odd = odd.saturating_sub(1);
            *won.entry(i).or_default() += share + extra;
        }
    }

    // chips no live player could claim go to the overall best
    if carried > 0 {
        let best = contributions
            .iter()
            .enumerate()
            .filter(|(_, c)| c.live)
            .filter_map(|(i, c)| ranking.rank_of(&c.name).map(|r| (r, i)))
            .min();
        if let Some((_, i)) = best {
            *won.entry(i).or_default() += carried;
        }
    }

    won.into_iter()
        .filter(|&(_, amount)| amount > 0)
        .map(|(i, amount)| Award {
            player: contributions[i].name.clone(),
            amount,
        })
        .collect()
}
