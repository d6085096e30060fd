//! Filter sidebar accordion model
//!
//! Presentation-agnostic: sections hold option lists and an expanded flag;
//! [`FilterAccordion::render`] marks options selected against the current
//! [`FilterSelection`].

use serde::Serialize;
use strum::IntoEnumIterator;

use super::selection::{FilterKey, FilterOption, FilterSelection, Period};
use crate::labels::title_case;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    key: FilterKey,
    options: Vec<FilterOption>,
    expanded: bool,
}

/// An option as displayed in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionItem {
    pub name: String,
    pub value: String,
    pub selected: bool,
}

/// A rendered accordion section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionSection {
    pub key: FilterKey,
    pub title: &'static str,
    pub expanded: bool,
    pub selected_count: usize,
    pub items: Vec<AccordionItem>,
}

/// Accordion of filter sections in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterAccordion {
    sections: Vec<Section>,
}

impl FilterAccordion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace the options of) a section, collapsed.
    pub fn with_section(mut self, key: FilterKey, options: Vec<FilterOption>) -> Self {
        self.set_options(key, options);
        self
    }

    /// Add the rental period section with its fixed options.
    pub fn with_period_section(self) -> Self {
        let options = Period::iter()
            .map(|period| FilterOption::new(title_case(period.as_ref()), period.as_ref()))
            .collect();
        self.with_section(FilterKey::Period, options)
    }

    /// Replace the options of a section, adding it if missing.
    pub fn set_options(&mut self, key: FilterKey, options: Vec<FilterOption>) {
        match self.sections.iter_mut().find(|s| s.key == key) {
            Some(section) => section.options = options,
            None => self.sections.push(Section {
                key,
                options,
                expanded: false,
            }),
        }
    }

    /// Flip a section's expanded state; returns the new state.
    pub fn toggle(&mut self, key: FilterKey) -> bool {
        match self.sections.iter_mut().find(|s| s.key == key) {
            Some(section) => {
                section.expanded = !section.expanded;
                section.expanded
            }
            None => false,
        }
    }

    /// Expand every section that has a selected value.
    pub fn expand_selected(&mut self, selection: &FilterSelection) {
        for section in &mut self.sections {
            if selection.is_active(section.key) {
                section.expanded = true;
            }
        }
    }

    pub fn is_expanded(&self, key: FilterKey) -> bool {
        self.sections.iter().any(|s| s.key == key && s.expanded)
    }

    pub fn render(&self, selection: &FilterSelection) -> Vec<AccordionSection> {
        self.sections
            .iter()
            .map(|section| {
                let items: Vec<AccordionItem> = section
                    .options
                    .iter()
                    .map(|option| AccordionItem {
                        name: option.name.clone(),
                        value: option.value.clone(),
                        selected: selection.is_selected(section.key, &option.value),
                    })
                    .collect();
                AccordionSection {
                    key: section.key,
                    title: section.key.title(),
                    expanded: section.expanded,
                    selected_count: items.iter().filter(|item| item.selected).count(),
                    items,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn colors() -> Vec<FilterOption> {
        vec![
            FilterOption::new("Red", "red"),
            FilterOption::new("Blue", "blue"),
            FilterOption::new("Black", "black"),
        ]
    }

    #[test]
    fn test_render_marks_selected() {
        let accordion = FilterAccordion::new()
            .with_section(FilterKey::Brand, vec![FilterOption::new("BMW", "bmw")])
            .with_section(FilterKey::Color, colors());
        let selection = FilterSelection {
            brand: Some("bmw".into()),
            color: BTreeSet::from(["red".to_string(), "black".to_string()]),
            ..FilterSelection::default()
        };

        let rendered = accordion.render(&selection);
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].title, "Brand");
        assert_eq!(rendered[0].selected_count, 1);
        assert_eq!(rendered[1].selected_count, 2);
        assert_eq!(
            rendered[1]
                .items
                .iter()
                .map(|item| item.selected)
                .collect::<Vec<_>>(),
            vec![true, false, true]
        );
    }

    #[test]
    fn test_toggle_and_expand_selected() {
        let mut accordion = FilterAccordion::new()
            .with_section(FilterKey::Color, colors())
            .with_section(FilterKey::Seats, vec![FilterOption::new("5", "5")]);
        assert!(accordion.toggle(FilterKey::Color));
        assert!(!accordion.toggle(FilterKey::Color));
        assert!(!accordion.toggle(FilterKey::Brand));

        let selection = FilterSelection {
            seats: Some("5".into()),
            ..FilterSelection::default()
        };
        accordion.expand_selected(&selection);
        assert!(accordion.is_expanded(FilterKey::Seats));
        assert!(!accordion.is_expanded(FilterKey::Color));
    }

    #[test]
    fn test_period_section() {
        let accordion = FilterAccordion::new().with_period_section();
        let selection = FilterSelection {
            period: Some(Period::Week),
            ..FilterSelection::default()
        };
        let rendered = accordion.render(&selection);
        let names: Vec<&str> = rendered[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Hour", "Day", "Week", "Month"]);
        assert_eq!(rendered[0].title, "Rental Period");
        assert!(rendered[0].items[2].selected);
    }

    #[test]
    fn test_set_options_replaces_in_place() {
        let mut accordion = FilterAccordion::new()
            .with_section(FilterKey::Brand, vec![])
            .with_section(FilterKey::Color, colors());
        accordion.set_options(FilterKey::Brand, vec![FilterOption::new("Audi", "audi")]);
        let rendered = accordion.render(&FilterSelection::new());
        assert_eq!(rendered[0].key, FilterKey::Brand);
        assert_eq!(rendered[0].items.len(), 1);
    }
}
