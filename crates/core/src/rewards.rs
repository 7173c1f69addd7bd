use crate::model::{GameMeta, Rewards, RouteState};

/// Resolve the coin/XP configuration for a game page.
///
/// Each field falls back independently: catalog metadata first, then whatever the
/// route carried, then `Rewards::DEFAULT`.
#[must_use]
pub fn resolve_rewards(meta: Option<&GameMeta>, route: Option<&RouteState>) -> Rewards {
    let coins = meta
        .and_then(|m| m.coins)
        .or_else(|| route.and_then(|r| r.coins))
        .unwrap_or(Rewards::DEFAULT.coins);
    let xp = meta
        .and_then(|m| m.xp)
        .or_else(|| route.and_then(|r| r.xp))
        .unwrap_or(Rewards::DEFAULT.xp);
    Rewards { coins, xp }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GameId, GameKind};

    fn meta(coins: Option<u32>, xp: Option<u32>) -> GameMeta {
        GameMeta {
            id: GameId::new(1),
            slug: "animals".into(),
            title: "Animals".into(),
            subtitle: None,
            category: "science".into(),
            index: 1,
            kind: GameKind::Quiz,
            coins,
            xp,
        }
    }

    #[test]
    fn metadata_wins() {
        let route = RouteState {
            coins: Some(1),
            xp: Some(1),
            ..RouteState::default()
        };
        let rewards = resolve_rewards(Some(&meta(Some(8), Some(20))), Some(&route));
        assert_eq!(rewards, Rewards { coins: 8, xp: 20 });
    }

    #[test]
    fn route_fills_missing_metadata_fields() {
        let route = RouteState {
            coins: Some(3),
            xp: Some(7),
            ..RouteState::default()
        };
        let rewards = resolve_rewards(Some(&meta(None, Some(20))), Some(&route));
        assert_eq!(rewards, Rewards { coins: 3, xp: 20 });
    }

    #[test]
    fn defaults_apply_last() {
        assert_eq!(resolve_rewards(None, None), Rewards { coins: 5, xp: 10 });
        assert_eq!(
            resolve_rewards(Some(&meta(None, None)), Some(&RouteState::default())),
            Rewards::DEFAULT
        );
    }
}
