use chrono::NaiveTime;

/// Quest age category. Determines which price table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Adult,
    Kids,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Adult => "adult",
            Category::Kids => "kids",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "adult" => Some(Category::Adult),
            "kids" => Some(Category::Kids),
            _ => None,
        }
    }
}

/// A static catalog entry for one quest room. Immutable after startup.
#[derive(Debug, Clone)]
pub struct Quest {
    pub key: String,
    pub title: String,
    pub category: Category,
    pub max_team: u8,
    /// Latest permitted start time for this quest.
    pub last_start: NaiveTime,
    /// Whether the quest carries an extended pre-briefing message.
    pub has_info: bool,
}

/// The venue's quest catalog, loaded once at process start.
#[derive(Debug, Clone)]
pub struct Catalog {
    quests: Vec<Quest>,
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or(NaiveTime::MIN)
}

impl Catalog {
    /// The current venue catalog. The "cannibal" quest runs up to close;
    /// every other quest must start by 20:30.
    pub fn venue() -> Self {
        let quest = |key: &str, title: &str, category, max_team, last_start, has_info| Quest {
            key: key.to_string(),
            title: title.to_string(),
            category,
            max_team,
            last_start,
            has_info,
        };

        Self {
            quests: vec![
                quest("inferno", "Инферно", Category::Adult, 6, hm(20, 30), true),
                quest("patient0", "Нулевой пациент", Category::Adult, 6, hm(20, 30), true),
                quest("cannibal", "Каннибал", Category::Adult, 6, hm(23, 30), true),
                quest("mirrors", "Зазеркалье", Category::Kids, 8, hm(20, 30), false),
                quest("pirates", "Остров сокровищ", Category::Kids, 8, hm(20, 30), false),
            ],
        }
    }

    pub fn get(&self, key: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.key == key)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(move |q| q.category == category)
    }

    pub fn all(&self) -> &[Quest] {
        &self.quests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::venue();
        let cannibal = catalog.get("cannibal").unwrap();
        assert_eq!(cannibal.title, "Каннибал");
        assert_eq!(cannibal.category, Category::Adult);
        assert_eq!(cannibal.last_start, hm(23, 30));
        assert!(catalog.get("nonexistent").is_none());
    }

    #[test]
    fn test_catalog_categories() {
        let catalog = Catalog::venue();
        let adult: Vec<_> = catalog.in_category(Category::Adult).collect();
        let kids: Vec<_> = catalog.in_category(Category::Kids).collect();
        assert_eq!(adult.len(), 3);
        assert_eq!(kids.len(), 2);
        assert!(kids.iter().all(|q| q.max_team == 8));
    }

    #[test]
    fn test_category_roundtrip() {
        assert_eq!(Category::parse("adult"), Some(Category::Adult));
        assert_eq!(Category::parse("kids"), Some(Category::Kids));
        assert_eq!(Category::parse("teen"), None);
        assert_eq!(Category::Adult.as_str(), "adult");
    }
}
