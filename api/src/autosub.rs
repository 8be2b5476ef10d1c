use crate::formation::Formation;
use crate::{EnrichedPlayer, Position, Substitution};

/// Work out which bench players come on for starters who are done and never played.
///
/// Single pass, first fit: bench players are tried in slot order and each claims
/// the first vacancy (in starter slot order) it can fill. A goalkeeper only ever
/// swaps with a goalkeeper. An outfield swap is accepted when the shape of the
/// starters not yet replaced, minus the outgoing starter plus the incoming bench
/// player, is still a legal formation. Bench players already brought on are not
/// counted back into that shape.
pub fn auto_substitutions(
    starting_eleven: &[EnrichedPlayer],
    bench: &[EnrichedPlayer],
) -> Vec<Substitution> {
    let needs_replacing: Vec<&EnrichedPlayer> = starting_eleven
        .iter()
        .filter(|p| p.needs_replacing())
        .collect();

    let mut substitutions = Vec::new();
    if needs_replacing.is_empty() {
        return substitutions;
    }

    let mut bench_order: Vec<&EnrichedPlayer> = bench.iter().collect();
    bench_order.sort_by_key(|p| p.slot);

    for bench_player in bench_order {
        if bench_player.needs_replacing() || bench_player.position == Position::Unknown {
            continue;
        }

        let vacancy = needs_replacing.iter().find(|starter| {
            !is_replaced(&substitutions, starter.slot)
                && can_swap(starting_eleven, &substitutions, starter, bench_player)
        });

        if let Some(starter) = vacancy {
            substitutions.push(Substitution {
                bench_slot: bench_player.slot,
                replaces_slot: starter.slot,
            });
        }
    }

    substitutions
}

fn can_swap(
    starting_eleven: &[EnrichedPlayer],
    substitutions: &[Substitution],
    starter: &EnrichedPlayer,
    bench_player: &EnrichedPlayer,
) -> bool {
    let starter_is_gk = starter.position == Position::Goalkeeper;
    let bench_is_gk = bench_player.position == Position::Goalkeeper;
    if starter_is_gk || bench_is_gk {
        return starter_is_gk && bench_is_gk;
    }

    let current = Formation::count(
        starting_eleven
            .iter()
            .filter(|p| !is_replaced(substitutions, p.slot))
            .map(|p| p.position),
    );
    current
        .with_swap(starter.position, bench_player.position)
        .is_valid()
}

fn is_replaced(substitutions: &[Substitution], slot: u8) -> bool {
    substitutions.iter().any(|s| s.replaces_slot == slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(slot: u8, position: Position) -> EnrichedPlayer {
        EnrichedPlayer {
            slot,
            player_id: u32::from(slot),
            position,
            minutes: 90,
            done: true,
            ..Default::default()
        }
    }

    fn absent(slot: u8, position: Position) -> EnrichedPlayer {
        EnrichedPlayer { minutes: 0, didnt_play: true, ..player(slot, position) }
    }

    /// Goalkeeper in slot 1, then defenders, midfielders and forwards in slot order.
    fn eleven(def: u8, mid: u8, fwd: u8) -> Vec<EnrichedPlayer> {
        let mut xi = vec![player(1, Position::Goalkeeper)];
        let lines = [
            (def, Position::Defender),
            (mid, Position::Midfielder),
            (fwd, Position::Forward),
        ];
        for (count, position) in lines {
            for _ in 0..count {
                let slot = xi.len() as u8 + 1;
                xi.push(player(slot, position));
            }
        }
        xi
    }

    fn bench(positions: [Position; 4]) -> Vec<EnrichedPlayer> {
        positions
            .into_iter()
            .enumerate()
            .map(|(i, pos)| player(12 + i as u8, pos))
            .collect()
    }

    fn standard_bench() -> Vec<EnrichedPlayer> {
        bench([
            Position::Goalkeeper,
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
        ])
    }

    #[test]
    fn no_absentees_means_no_substitutions() {
        let xi = eleven(4, 4, 2);
        assert!(auto_substitutions(&xi, &standard_bench()).is_empty());
    }

    #[test]
    fn like_for_like_defender_comes_on() {
        let mut xi = eleven(3, 5, 2);
        xi[3] = absent(4, Position::Defender);
        let mut b = standard_bench();
        b[0] = absent(12, Position::Goalkeeper);

        let subs = auto_substitutions(&xi, &b);
        assert_eq!(subs, vec![Substitution { bench_slot: 13, replaces_slot: 4 }]);
    }

    #[test]
    fn first_bench_slot_defender_comes_on() {
        let mut xi = eleven(3, 5, 2);
        xi[3] = absent(4, Position::Defender);
        let b = bench([
            Position::Defender,
            Position::Goalkeeper,
            Position::Midfielder,
            Position::Forward,
        ]);

        let subs = auto_substitutions(&xi, &b);
        assert_eq!(subs, vec![Substitution { bench_slot: 12, replaces_slot: 4 }]);
    }

    #[test]
    fn goalkeeper_only_replaced_by_goalkeeper() {
        let mut xi = eleven(4, 4, 2);
        xi[0] = absent(1, Position::Goalkeeper);
        let mut b = bench([
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
            Position::Goalkeeper,
        ]);
        b[3] = absent(15, Position::Goalkeeper);

        assert!(auto_substitutions(&xi, &b).is_empty());

        b[3] = player(15, Position::Goalkeeper);
        assert_eq!(
            auto_substitutions(&xi, &b),
            vec![Substitution { bench_slot: 15, replaces_slot: 1 }]
        );
    }

    #[test]
    fn bench_goalkeeper_never_fills_an_outfield_vacancy() {
        let mut xi = eleven(4, 4, 2);
        xi[6] = absent(7, Position::Midfielder);
        let b = vec![
            player(12, Position::Goalkeeper),
            absent(13, Position::Defender),
            absent(14, Position::Midfielder),
            absent(15, Position::Forward),
        ];
        assert!(auto_substitutions(&xi, &b).is_empty());
    }

    #[test]
    fn unused_bench_player_is_skipped_and_defender_floor_holds() {
        // 1-3-5-2 with a defender and a midfielder absent.
        let mut xi = eleven(3, 5, 2);
        xi[1] = absent(2, Position::Defender);
        xi[5] = absent(6, Position::Midfielder);
        let mut b = standard_bench();
        b[1] = absent(13, Position::Defender);

        let subs = auto_substitutions(&xi, &b);
        assert_eq!(subs, vec![Substitution { bench_slot: 14, replaces_slot: 6 }]);
        assert!(!subs.iter().any(|s| s.bench_slot == 13));
        assert!(!subs.iter().any(|s| s.replaces_slot == 2));
    }

    #[test]
    fn earlier_bench_slot_gets_first_claim() {
        // 1-4-4-2, midfielder and defender absent; the first outfield bench
        // player takes the first vacancy in slot order even though it is a forward.
        let mut xi = eleven(4, 4, 2);
        xi[4] = absent(5, Position::Defender);
        xi[6] = absent(7, Position::Midfielder);
        let b = bench([
            Position::Goalkeeper,
            Position::Forward,
            Position::Defender,
            Position::Midfielder,
        ]);

        let subs = auto_substitutions(&xi, &b);
        assert_eq!(
            subs,
            vec![
                Substitution { bench_slot: 13, replaces_slot: 5 },
                Substitution { bench_slot: 14, replaces_slot: 7 },
            ]
        );
    }

    #[test]
    fn activated_bench_players_are_not_counted_back_into_the_shape() {
        // 1-4-4-2 with two defenders absent. The bench defender fills the first
        // hole, but the shape for the next swap leaves the replaced defender out
        // without counting the bench defender in, so a midfielder cannot take the
        // second hole.
        let mut xi = eleven(4, 4, 2);
        xi[1] = absent(2, Position::Defender);
        xi[2] = absent(3, Position::Defender);
        let b = bench([
            Position::Goalkeeper,
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
        ]);

        let subs = auto_substitutions(&xi, &b);
        assert_eq!(subs, vec![Substitution { bench_slot: 13, replaces_slot: 2 }]);
    }

    #[test]
    fn each_vacancy_and_bench_slot_used_once() {
        let mut xi = eleven(4, 4, 2);
        xi[7] = absent(8, Position::Midfielder);
        let b = bench([
            Position::Goalkeeper,
            Position::Midfielder,
            Position::Midfielder,
            Position::Forward,
        ]);
        let subs = auto_substitutions(&xi, &b);
        assert_eq!(subs, vec![Substitution { bench_slot: 13, replaces_slot: 8 }]);
    }

    #[test]
    fn unknown_position_bench_player_never_comes_on() {
        let mut xi = eleven(4, 4, 2);
        xi[7] = absent(8, Position::Midfielder);
        let mut b = standard_bench();
        b[1] = EnrichedPlayer { done: false, ..player(13, Position::Unknown) };
        b[2] = absent(14, Position::Midfielder);
        b[3] = absent(15, Position::Forward);
        assert!(auto_substitutions(&xi, &b).is_empty());
    }

    #[test]
    fn bench_is_walked_in_slot_order_regardless_of_input_order() {
        let mut xi = eleven(4, 4, 2);
        xi[7] = absent(8, Position::Midfielder);
        let mut b = standard_bench();
        b.reverse();
        let subs = auto_substitutions(&xi, &b);
        assert_eq!(subs, vec![Substitution { bench_slot: 13, replaces_slot: 8 }]);
    }
}
