use services::GameCatalog;

use super::game_vm::kind_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameCardVm {
    pub id: u64,
    pub index: u32,
    pub title: String,
    pub subtitle: Option<String>,
    pub kind_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryVm {
    pub name: String,
    pub title: String,
    pub games: Vec<GameCardVm>,
}

/// Categories in name order, each with its games in play order.
#[must_use]
pub fn map_catalog(catalog: &GameCatalog) -> Vec<CategoryVm> {
    catalog
        .categories()
        .into_iter()
        .map(|name| CategoryVm {
            name: name.to_string(),
            title: category_title(name),
            games: catalog
                .games_in_category(name)
                .into_iter()
                .map(|meta| GameCardVm {
                    id: meta.id.value(),
                    index: meta.index,
                    title: meta.title.clone(),
                    subtitle: meta.subtitle.clone(),
                    kind_label: kind_label(meta.kind),
                })
                .collect(),
        })
        .collect()
}

#[must_use]
pub fn category_title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_groups_by_category() {
        let catalog = GameCatalog::bundled().expect("bundled catalog");
        let groups = map_catalog(&catalog);
        let names: Vec<_> = groups.iter().map(|group| group.name.as_str()).collect();
        assert_eq!(names, ["math", "science", "wellbeing"]);

        let science = &groups[1];
        assert_eq!(science.title, "Science");
        let indices: Vec<_> = science.games.iter().map(|game| game.index).collect();
        assert_eq!(indices, [1, 2, 3]);
        assert_eq!(science.games[1].kind_label, "Match");
    }

    #[test]
    fn category_title_capitalises_first_letter() {
        assert_eq!(category_title("math"), "Math");
        assert_eq!(category_title(""), "");
    }
}
