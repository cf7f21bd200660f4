use crate::math::Color;

use super::SceneError;

/// Index of a node in the imported scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Name-based node lookup over an imported scene
pub trait NodeLookup {
    fn find(&self, name: &str) -> Option<NodeId>;
    fn name_of(&self, id: NodeId) -> Option<&str>;
}

pub const BAKED: &str = "Baked";
pub const TRADITIONAL_LAMP: &str = "Traditional-Lamp-Bulb-Emission";
pub const ARC_LAMP: &str = "Arc-Lamp-Bulb-Emission";
pub const BUFFET_LAMP: &str = "Buffet-Lamp-Bulb-Emission";
pub const FAIRY_BULBS: &str = "Fairy-Bulb-Emission";
pub const CANDLE_THREADS: &str = "Candles-Emission";
pub const COFFEE_SMOKE: &str = "coffee-smoke";
pub const FIRE: &str = "fire";
pub const CANDLES: &str = "Candles";
pub const VINYL_DISC: &str = "vinyl-disc";
pub const VINYL_ARM: &str = "vinyl-arm";
pub const VINYL_PLAYER: &str = "vinyl-player";

/// Names the model must contain
pub const REQUIRED: [&str; 11] = [
    BAKED,
    TRADITIONAL_LAMP,
    ARC_LAMP,
    BUFFET_LAMP,
    FAIRY_BULBS,
    CANDLE_THREADS,
    COFFEE_SMOKE,
    FIRE,
    CANDLES,
    VINYL_DISC,
    VINYL_ARM,
];

/// Which material draws a node's mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialSlot {
    Baked,
    /// Flat color shared by the lamp bulbs and fairy lights
    LampEmission,
    /// Flat color for one-off unlit meshes
    Flat(Color),
    CoffeeSmoke,
    Fire,
    Candles,
}

/// Typed handles to every named node the scene wires up
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNodes {
    pub baked: NodeId,
    pub traditional_lamp: NodeId,
    pub arc_lamp: NodeId,
    pub buffet_lamp: NodeId,
    pub fairy_bulbs: NodeId,
    pub candle_threads: NodeId,
    pub coffee_smoke: NodeId,
    pub fire: NodeId,
    pub candles: NodeId,
    pub vinyl_disc: NodeId,
    pub vinyl_arm: NodeId,
    pub vinyl_player: Option<NodeId>,
}

impl SceneNodes {
    /// Resolve every named node, failing with the full list of missing names
    pub fn resolve(lookup: &impl NodeLookup) -> Result<Self, SceneError> {
        let missing: Vec<String> = REQUIRED
            .iter()
            .filter(|name| lookup.find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SceneError::MissingNodes(missing));
        }

        let get = |name: &str| {
            lookup
                .find(name)
                .ok_or_else(|| SceneError::MissingNodes(vec![name.to_string()]))
        };

        let nodes = Self {
            baked: get(BAKED)?,
            traditional_lamp: get(TRADITIONAL_LAMP)?,
            arc_lamp: get(ARC_LAMP)?,
            buffet_lamp: get(BUFFET_LAMP)?,
            fairy_bulbs: get(FAIRY_BULBS)?,
            candle_threads: get(CANDLE_THREADS)?,
            coffee_smoke: get(COFFEE_SMOKE)?,
            fire: get(FIRE)?,
            candles: get(CANDLES)?,
            vinyl_disc: get(VINYL_DISC)?,
            vinyl_arm: get(VINYL_ARM)?,
            vinyl_player: lookup.find(VINYL_PLAYER),
        };
        if nodes.vinyl_player.is_none() {
            log::debug!("model has no {:?} node; only disc and arm are clickable", VINYL_PLAYER);
        }
        Ok(nodes)
    }

    /// Material for each wired node; anything not listed draws baked
    pub fn assignments(&self) -> Vec<(NodeId, MaterialSlot)> {
        vec![
            (self.baked, MaterialSlot::Baked),
            (self.traditional_lamp, MaterialSlot::LampEmission),
            (self.arc_lamp, MaterialSlot::LampEmission),
            (self.buffet_lamp, MaterialSlot::LampEmission),
            (self.fairy_bulbs, MaterialSlot::LampEmission),
            (self.candle_threads, MaterialSlot::Flat(Color::BLACK)),
            (self.coffee_smoke, MaterialSlot::CoffeeSmoke),
            (self.fire, MaterialSlot::Fire),
            (self.candles, MaterialSlot::Candles),
        ]
    }

    pub fn slot_for(&self, id: NodeId) -> MaterialSlot {
        self.assignments()
            .into_iter()
            .find(|(node, _)| *node == id)
            .map(|(_, slot)| slot)
            .unwrap_or(MaterialSlot::Baked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Names(HashMap<String, NodeId>);

    impl NodeLookup for Names {
        fn find(&self, name: &str) -> Option<NodeId> {
            self.0.get(name).copied()
        }

        fn name_of(&self, id: NodeId) -> Option<&str> {
            self.0.iter().find(|(_, v)| **v == id).map(|(k, _)| k.as_str())
        }
    }

    fn all_required() -> Names {
        Names(
            REQUIRED
                .iter()
                .enumerate()
                .map(|(i, n)| (n.to_string(), NodeId(i)))
                .collect(),
        )
    }

    #[test]
    fn test_resolve_without_optional_player() {
        let nodes = SceneNodes::resolve(&all_required()).unwrap();
        assert_eq!(nodes.baked, NodeId(0));
        assert_eq!(nodes.vinyl_arm, NodeId(10));
        assert_eq!(nodes.vinyl_player, None);
    }

    #[test]
    fn test_unlisted_nodes_draw_baked() {
        let nodes = SceneNodes::resolve(&all_required()).unwrap();
        assert_eq!(nodes.slot_for(nodes.fire), MaterialSlot::Fire);
        assert_eq!(nodes.slot_for(NodeId(99)), MaterialSlot::Baked);
        assert_eq!(nodes.slot_for(nodes.candle_threads), MaterialSlot::Flat(Color::BLACK));
    }
}
