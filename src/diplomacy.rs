use serde::{Deserialize, Serialize};

use crate::race::RaceType;

/// Дипломатические отношения между двумя расами.
///
/// Пара рас неупорядочена: сравнение не зависит от порядка `race_a`/`race_b`
/// и не учитывает остальные поля.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    #[serde(default = "default_race")]
    pub race_a: RaceType,
    #[serde(default = "default_race")]
    pub race_b: RaceType,
    #[serde(default)]
    pub relation: u8,
    #[serde(default)]
    pub alliance: bool,
    #[serde(default)]
    pub always_at_war: bool,
    #[serde(default = "default_permanent_alliance")]
    pub permanent_alliance: bool,
}

fn default_race() -> RaceType {
    RaceType::Neutral
}
fn default_permanent_alliance() -> bool {
    true
}

impl Relation {
    #[must_use]
    pub fn new(race_a: RaceType, race_b: RaceType) -> Self {
        Self {
            race_a,
            race_b,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn connects(&self, a: RaceType, b: RaceType) -> bool {
        (self.race_a == a && self.race_b == b) || (self.race_a == b && self.race_b == a)
    }
}

impl Default for Relation {
    fn default() -> Self {
        Self {
            race_a: RaceType::Neutral,
            race_b: RaceType::Neutral,
            relation: 0,
            alliance: false,
            always_at_war: false,
            permanent_alliance: true,
        }
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.connects(other.race_a, other.race_b)
    }
}

impl Eq for Relation {}

/// Дипломатия шаблона: не более одной записи на пару рас.
///
/// При загрузке записи проходят через `add`, повтор пары считается ошибкой.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDiplomacy")]
pub struct MapTemplateDiplomacy {
    pub relations: Vec<Relation>,
}

#[derive(Deserialize)]
struct RawDiplomacy {
    #[serde(default)]
    relations: Vec<Relation>,
}

impl TryFrom<RawDiplomacy> for MapTemplateDiplomacy {
    type Error = String;

    fn try_from(raw: RawDiplomacy) -> Result<Self, Self::Error> {
        let mut diplomacy = Self::default();
        for relation in raw.relations {
            let (a, b) = (relation.race_a, relation.race_b);
            if !diplomacy.add(relation) {
                return Err(format!("relation between {a:?} and {b:?} is described twice"));
            }
        }
        Ok(diplomacy)
    }
}

impl MapTemplateDiplomacy {
    /// Добавляет отношения, если для этой пары рас их ещё нет.
    ///
    /// Возвращает `false` и сохраняет прежнюю запись, если пара уже описана.
    pub fn add(&mut self, relation: Relation) -> bool {
        if self.relations.contains(&relation) {
            return false;
        }
        self.relations.push(relation);
        true
    }

    #[must_use]
    pub fn find(&self, a: RaceType, b: RaceType) -> Option<&Relation> {
        self.relations.iter().find(|r| r.connects(a, b))
    }
}
