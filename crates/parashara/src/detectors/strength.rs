//! Strength scoring shared by the detectors.
//!
//! Dignity sets the base tier; combustion lowers it, a kendra placement from
//! the ascendant raises it.

use crate::chart::{ChartContext, Planet, Reference};
use crate::detectors::record::Strength;
use crate::rules::dignity::Dignity;
use crate::rules::geometry;

/// Base tier for a dignity.
pub fn dignity_strength(dignity: Dignity) -> Strength {
    match dignity {
        Dignity::Exalted => Strength::VeryStrong,
        Dignity::OwnSign => Strength::Strong,
        Dignity::Friendly | Dignity::Neutral => Strength::Medium,
        Dignity::Enemy | Dignity::Debilitated => Strength::Weak,
    }
}

/// Strength of one planet in this chart.
pub fn planet_strength(ctx: &ChartContext, planet: Planet) -> Strength {
    let Some(dignity) = ctx.dignity(planet) else {
        return Strength::Weak;
    };
    let mut strength = dignity_strength(dignity);
    if ctx.is_combust(planet) {
        strength = strength.lowered();
    } else if ctx
        .position_from(Reference::Lagna, planet)
        .map(|h| geometry::is_kendra_house(h))
        .unwrap_or(false)
        && dignity >= Dignity::Friendly
        && strength < Strength::Strong
    {
        strength = strength.raised();
    }
    strength
}

/// Rounded mean strength of several planets.
pub fn combined_strength(ctx: &ChartContext, planets: &[Planet]) -> Strength {
    if planets.is_empty() {
        return Strength::Weak;
    }
    let total: u32 = planets.iter().map(|p| planet_strength(ctx, *p).rank()).sum();
    let count = planets.len() as u32;
    Strength::from_rank((total * 2 + count) / (count * 2))
}

/// Tier from how many of `total` supporting conditions hold.
pub fn strength_from_support(support: usize, total: usize) -> Strength {
    if total == 0 {
        return Strength::Medium;
    }
    let ratio = support as f64 / total as f64;
    if ratio >= 0.99 {
        Strength::VeryStrong
    } else if ratio >= 0.66 {
        Strength::Strong
    } else if ratio >= 0.33 {
        Strength::Medium
    } else {
        Strength::Weak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Chart;
    use crate::config::EngineConfig;

    #[test]
    fn test_planet_strength_from_dignity() {
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Sun, 1) // exalted in Aries
            .place(Planet::Saturn, 1) // debilitated in Aries
            .place(Planet::Jupiter, 5) // friendly in Leo
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        assert_eq!(planet_strength(&ctx, Planet::Sun), Strength::VeryStrong);
        assert_eq!(planet_strength(&ctx, Planet::Saturn), Strength::Weak);
        assert_eq!(planet_strength(&ctx, Planet::Jupiter), Strength::Medium);
        assert_eq!(planet_strength(&ctx, Planet::Venus), Strength::Weak);
    }

    #[test]
    fn test_combined_strength_rounds() {
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Sun, 1)
            .place(Planet::Saturn, 1)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        // (3 + 0) / 2 = 1.5 rounds to Strong
        assert_eq!(combined_strength(&ctx, &[Planet::Sun, Planet::Saturn]), Strength::Strong);
    }

    #[test]
    fn test_strength_from_support() {
        assert_eq!(strength_from_support(3, 3), Strength::VeryStrong);
        assert_eq!(strength_from_support(1, 3), Strength::Medium);
        assert_eq!(strength_from_support(0, 3), Strength::Weak);
    }
}
