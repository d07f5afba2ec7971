// src/contents.rs
//! Содержимое шаблона: зоны, связи, дипломатия и переменные сценария
//!
//! Зоны хранятся в одном словаре по идентификатору, а связи ссылаются на них через `TemplateZoneId`.

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::diplomacy::MapTemplateDiplomacy;
use crate::zone::{TemplateZoneId, ZoneConnection, ZoneOptions};

pub type Zones = BTreeMap<TemplateZoneId, ZoneOptions>;

/// Переменная сценария, заданная шаблоном
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioVariable {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapTemplateScenarioVariables {
    pub scenario_variables: Vec<ScenarioVariable>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapTemplateContents {
    #[serde(default, with = "zone_list")]
    pub zones: Zones,
    #[serde(default)]
    pub connections: Vec<ZoneConnection>,
    #[serde(default)]
    pub diplomacy: MapTemplateDiplomacy,
    #[serde(default)]
    pub scenario_variables: MapTemplateScenarioVariables,
}

impl MapTemplateContents {
    /// Добавляет зону, заменяя прежнюю с тем же идентификатором
    pub fn add_zone(&mut self, zone: ZoneOptions) -> Option<ZoneOptions> {
        self.zones.insert(zone.id, zone)
    }

    pub fn connect(&mut self, connection: ZoneConnection) {
        self.connections.push(connection);
    }

    /// Связи, которые ссылаются на отсутствующие зоны
    #[must_use]
    pub fn dangling_connections(&self) -> Vec<&ZoneConnection> {
        self.connections
            .iter()
            .filter(|c| !self.zones.contains_key(&c.zone_from) || !self.zones.contains_key(&c.zone_to))
            .collect()
    }

    /// Строит неориентированный граф зон, вес ребра равен силе охраны прохода.
    ///
    /// Связи с отсутствующими зонами пропускаются.
    #[must_use]
    pub fn zone_graph(&self) -> UnGraph<TemplateZoneId, u32> {
        let mut graph = UnGraph::new_undirected();
        let mut id_to_node: HashMap<TemplateZoneId, NodeIndex> = HashMap::new();

        for &id in self.zones.keys() {
            id_to_node.insert(id, graph.add_node(id));
        }

        for connection in &self.connections {
            if let (Some(&from), Some(&to)) = (
                id_to_node.get(&connection.zone_from),
                id_to_node.get(&connection.zone_to),
            ) {
                graph.add_edge(from, to, connection.guard_strength);
            }
        }
        graph
    }
}

// В TOML ключи словаря всегда строки, поэтому зоны описываются списком
mod zone_list {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Zones;
    use crate::zone::ZoneOptions;

    pub fn serialize<S: Serializer>(zones: &Zones, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(zones.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Zones, D::Error> {
        let list = Vec::<ZoneOptions>::deserialize(deserializer)?;
        let mut zones = Zones::new();
        for zone in list {
            let id = zone.id;
            if zones.insert(id, zone).is_some() {
                return Err(D::Error::custom(format!("zone {} is described twice", id.0)));
            }
        }
        Ok(zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ZoneType;
    use petgraph::algo::connected_components;

    fn three_zones() -> MapTemplateContents {
        let mut contents = MapTemplateContents::default();
        contents.add_zone(ZoneOptions::new(TemplateZoneId(0), ZoneType::PlayerStart));
        contents.add_zone(ZoneOptions::new(TemplateZoneId(1), ZoneType::PlayerStart));
        contents.add_zone(ZoneOptions::new(TemplateZoneId(2), ZoneType::Treasure));
        contents.connect(ZoneConnection::new(TemplateZoneId(0), TemplateZoneId(2)));
        contents.connect(ZoneConnection {
            guard_strength: 3,
            ..ZoneConnection::new(TemplateZoneId(2), TemplateZoneId(1))
        });
        contents
    }

    #[test]
    fn zones_are_ordered_by_id() {
        let mut contents = MapTemplateContents::default();
        for id in [5, 1, 3] {
            contents.add_zone(ZoneOptions::new(TemplateZoneId(id), ZoneType::Junction));
        }
        let ids: Vec<u32> = contents.zones.keys().map(|id| id.0).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn finds_dangling_connections() {
        let mut contents = three_zones();
        assert!(contents.dangling_connections().is_empty());

        contents.connect(ZoneConnection::new(TemplateZoneId(1), TemplateZoneId(9)));
        let dangling = contents.dangling_connections();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].zone_to, TemplateZoneId(9));
    }

    #[test]
    fn repeated_zone_id_fails_to_load() {
        let source = r#"
[[zones]]
id = 0
type = "PlayerStart"
size = 4

[[zones]]
id = 0
type = "Water"
"#;
        let err = toml::from_str::<MapTemplateContents>(source).unwrap_err();
        assert!(err.to_string().contains("zone 0 is described twice"));
    }

    #[test]
    fn zone_graph_is_connected() {
        let mut contents = three_zones();
        contents.connect(ZoneConnection::new(TemplateZoneId(0), TemplateZoneId(42)));

        let graph = contents.zone_graph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(connected_components(&graph), 1);
    }
}
