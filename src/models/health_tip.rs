//! Health tips library.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipCategory {
    Nutrition,
    Fitness,
    MentalHealth,
    Wellness,
}

impl TipCategory {
    /// Slug used in search matching.
    pub fn slug(self) -> &'static str {
        match self {
            TipCategory::Nutrition => "nutrition",
            TipCategory::Fitness => "fitness",
            TipCategory::MentalHealth => "mental-health",
            TipCategory::Wellness => "wellness",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TipCategory::Nutrition => "Nutrition",
            TipCategory::Fitness => "Fitness",
            TipCategory::MentalHealth => "Mental Health",
            TipCategory::Wellness => "Wellness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthTip {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    pub category: TipCategory,
    pub read_minutes: u32,
}

impl HealthTip {
    pub fn read_time(&self) -> String {
        format!("{} min read", self.read_minutes)
    }
}

/// One row of the categories tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary<'a> {
    pub category: TipCategory,
    pub count: usize,
    /// Up to three titles, in list order.
    pub titles: Vec<&'a str>,
}

/// Tip library plus the patient's saved set.
#[derive(Debug, Clone, Default)]
pub struct HealthTips {
    tips: Vec<HealthTip>,
    saved: HashSet<u32>,
}

impl HealthTips {
    pub fn sample() -> Self {
        let rows = [
            (
                1,
                "The Importance of Staying Hydrated",
                "Learn why drinking enough water is crucial for your overall health and wellbeing.",
                TipCategory::Nutrition,
                3,
            ),
            (
                2,
                "Benefits of Regular Exercise",
                "Discover how just 30 minutes of daily exercise can transform your health.",
                TipCategory::Fitness,
                5,
            ),
            (
                3,
                "Managing Stress Through Mindfulness",
                "Practical techniques to reduce stress and improve mental wellbeing through mindfulness.",
                TipCategory::MentalHealth,
                4,
            ),
            (
                4,
                "Healthy Eating on a Budget",
                "Tips for maintaining a nutritious diet without breaking the bank.",
                TipCategory::Nutrition,
                6,
            ),
            (
                5,
                "The Science of Sleep",
                "Why quality sleep is essential and how to improve your sleep habits.",
                TipCategory::Wellness,
                7,
            ),
            (
                6,
                "Understanding Seasonal Allergies",
                "Learn about common triggers and how to manage seasonal allergy symptoms.",
                TipCategory::Wellness,
                4,
            ),
        ];

        let tips = rows
            .into_iter()
            .map(|(id, title, excerpt, category, read_minutes)| HealthTip {
                id,
                title: title.to_string(),
                excerpt: excerpt.to_string(),
                category,
                read_minutes,
            })
            .collect();

        Self {
            tips,
            saved: HashSet::new(),
        }
    }

    pub fn all(&self) -> &[HealthTip] {
        &self.tips
    }

    /// Tips whose title, excerpt, or category slug contains `query`.
    pub fn filtered(&self, query: &str) -> Vec<&HealthTip> {
        let needle = query.trim().to_lowercase();
        self.tips
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.excerpt.to_lowercase().contains(&needle)
                    || t.category.slug().contains(&needle)
            })
            .collect()
    }

    /// Categories in order of first appearance, with counts.
    pub fn categories(&self) -> Vec<CategorySummary<'_>> {
        let mut summaries: Vec<CategorySummary<'_>> = Vec::new();
        for tip in &self.tips {
            match summaries.iter_mut().find(|s| s.category == tip.category) {
                Some(summary) => {
                    summary.count += 1;
                    if summary.titles.len() < 3 {
                        summary.titles.push(tip.title.as_str());
                    }
                }
                None => summaries.push(CategorySummary {
                    category: tip.category,
                    count: 1,
                    titles: vec![tip.title.as_str()],
                }),
            }
        }
        summaries
    }

    pub fn is_saved(&self, id: u32) -> bool {
        self.saved.contains(&id)
    }

    /// Save or unsave a tip. Returns whether it is now saved.
    pub fn toggle_saved(&mut self, id: u32) -> bool {
        if self.saved.remove(&id) {
            false
        } else {
            self.saved.insert(id)
        }
    }

    /// Saved tips, in list order.
    pub fn saved(&self) -> Vec<&HealthTip> {
        self.tips.iter().filter(|t| self.saved.contains(&t.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_covers_category_slug() {
        let tips = HealthTips::sample();
        let titles: Vec<_> = tips.filtered("mental").iter().map(|t| t.id).collect();
        assert_eq!(titles, vec![3]);
        assert_eq!(tips.filtered("SLEEP").len(), 1);
        assert_eq!(tips.filtered("").len(), 6);
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let tips = HealthTips::sample();
        let categories = tips.categories();
        let order: Vec<_> = categories.iter().map(|c| (c.category, c.count)).collect();
        assert_eq!(
            order,
            vec![
                (TipCategory::Nutrition, 2),
                (TipCategory::Fitness, 1),
                (TipCategory::MentalHealth, 1),
                (TipCategory::Wellness, 2),
            ]
        );
        assert_eq!(
            categories[0].titles,
            vec!["The Importance of Staying Hydrated", "Healthy Eating on a Budget"]
        );
    }

    #[test]
    fn test_toggle_saved() {
        let mut tips = HealthTips::sample();
        assert!(tips.saved().is_empty());

        assert!(tips.toggle_saved(5));
        assert!(tips.toggle_saved(2));
        let saved: Vec<_> = tips.saved().iter().map(|t| t.id).collect();
        assert_eq!(saved, vec![2, 5]);

        assert!(!tips.toggle_saved(5));
        assert!(!tips.is_saved(5));
        assert_eq!(tips.all()[0].read_time(), "3 min read");
    }
}
