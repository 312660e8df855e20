/// One listing page to fetch: a category page, or one subcategory page of a
/// category that is split across subpages.
#[derive(Debug, Clone)]
pub struct PageTarget {
    pub url: String,
    pub category: String,
    pub subcategory: Option<String>,
}

impl PageTarget {
    /// Display name for logs: `Geography` or `Geography/Cities`.
    pub fn page_name(&self) -> String {
        match &self.subcategory {
            Some(sub) => format!("{}/{}", self.category, sub),
            None => self.category.clone(),
        }
    }
}

/// Static mapping from category to its ordered subcategories. Supplied as a
/// literal by the caller and used only to enumerate fetch targets; never
/// inferred from scraped data. Iteration order is declaration order, which
/// fixes the order of records downstream.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    base_url: String,
    entries: Vec<(String, Vec<String>)>,
}

impl Taxonomy {
    pub fn new(base_url: &str, entries: Vec<(String, Vec<String>)>) -> Self {
        Self {
            base_url: base_url.to_string(),
            entries,
        }
    }

    /// The level-5 vital-articles listing, one entry per subpage tree.
    pub fn vital_articles() -> Self {
        let entries = [
            (
                "People",
                vec![
                    "Writers_and_journalists",
                    "Artists,_musicians,_and_composers",
                    "Entertainers,_directors,_producers,_and_screenwriters",
                    "Philosophers,_historians,_and_social_scientists",
                    "Religious_figures",
                    "Politicians_and_leaders",
                    "Military_personnel,_revolutionaries,_and_activists",
                    "Scientists,_inventors,_and_mathematicians",
                    "Sports_figures",
                    "Miscellaneous",
                ],
            ),
            ("History", vec![]),
            (
                "Geography",
                vec![
                    "Physical_geography",
                    "Countries_and_subdivisions",
                    "Cities",
                ],
            ),
            ("Arts", vec![]),
            ("Philosophy_and_religion", vec![]),
            (
                "Everyday_life",
                vec!["Everyday_life", "Sports,_games_and_recreation"],
            ),
            (
                "Society_and_social_sciences",
                vec!["Social_studies", "Politics_and_economics", "Culture"],
            ),
            (
                "Biology_and_health_sciences",
                vec![
                    "Biology,_biochemistry,_anatomy,_and_physiology",
                    "Animals",
                    "Plants,_fungi,_and_other_organisms",
                    "Health,_medicine,_and_disease",
                ],
            ),
            (
                "Physical_sciences",
                vec![
                    "Basics_and_measurement",
                    "Astronomy",
                    "Chemistry",
                    "Earth_science",
                    "Physics",
                ],
            ),
            ("Technology", vec![]),
            ("Mathematics", vec![]),
        ]
        .into_iter()
        .map(|(category, subs)| {
            (
                category.to_string(),
                subs.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

        Self::new(
            "https://en.wikipedia.org/wiki/Wikipedia:Vital_articles/Level/5/",
            entries,
        )
    }

    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    /// Expand to concrete fetch targets, in declaration order: the category
    /// page itself when it has no subcategories, else one page per
    /// subcategory.
    pub fn page_targets(&self) -> Vec<PageTarget> {
        let mut targets = Vec::new();
        for (category, subcategories) in &self.entries {
            if subcategories.is_empty() {
                targets.push(PageTarget {
                    url: format!("{}{}", self.base_url, category),
                    category: category.clone(),
                    subcategory: None,
                });
            } else {
                for subcategory in subcategories {
                    targets.push(PageTarget {
                        url: format!("{}{}/{}", self.base_url, category, subcategory),
                        category: category.clone(),
                        subcategory: Some(subcategory.clone()),
                    });
                }
            }
        }
        targets
    }
}
