//! Built-in component palette.
//!
//! Each entry pairs display metadata with an [`ElementTemplate`]. Templates
//! carry no ids; they are minted when a template is added to a page.

use ienet_document::{
    ButtonSettings, ElementTemplate, ElementType, FormSettings, ImageSettings, LayoutSettings,
    SettingsKind, TextSettings,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Basic,
    Layout,
    Components,
    Forms,
    Pro,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Basic,
        Category::Layout,
        Category::Components,
        Category::Forms,
        Category::Pro,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Basic => "Basic",
            Category::Layout => "Layout",
            Category::Components => "Components",
            Category::Forms => "Forms",
            Category::Pro => "Pro",
        }
    }

    /// Case-insensitive lookup by name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A palette entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub is_pro: bool,
    pub template: ElementTemplate,
}

/// The set of templates offered in the builder's palette
#[derive(Debug, Clone)]
pub struct ComponentLibrary {
    templates: Vec<ComponentTemplate>,
}

impl ComponentLibrary {
    /// Library with the built-in templates
    pub fn new() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    pub fn add(&mut self, template: ComponentTemplate) {
        self.templates.push(template);
    }

    pub fn templates(&self) -> &[ComponentTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&ComponentTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &ComponentTemplate> {
        self.templates
            .iter()
            .filter(move |template| template.category == category)
    }

    /// Templates whose name or description contains `query`, ignoring case
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a ComponentTemplate> {
        let query = query.to_lowercase();
        self.templates.iter().filter(move |template| {
            template.name.to_lowercase().contains(&query)
                || template.description.to_lowercase().contains(&query)
        })
    }
}

impl Default for ComponentLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn entry(
    id: &'static str,
    name: &'static str,
    category: Category,
    description: &'static str,
    template: ElementTemplate,
) -> ComponentTemplate {
    ComponentTemplate {
        id,
        name,
        category,
        description,
        is_pro: category == Category::Pro,
        template,
    }
}

fn text(tag: &str, class_name: &str, content: &str) -> ElementTemplate {
    ElementTemplate::new(ElementType::Text)
        .with_content(content)
        .with_class(class_name)
        .with_settings(SettingsKind::Text(TextSettings {
            tag: Some(tag.to_string()),
            href: None,
        }))
        .editable()
}

fn link(content: &str) -> ElementTemplate {
    ElementTemplate::new(ElementType::Text)
        .with_content(content)
        .with_class("text-gray-700 dark:text-gray-300 hover:text-blue-600 cursor-pointer")
        .with_settings(SettingsKind::Text(TextSettings {
            tag: Some("a".to_string()),
            href: Some("#".to_string()),
        }))
        .editable()
}

fn button(class_name: &str, content: &str) -> ElementTemplate {
    ElementTemplate::new(ElementType::Button)
        .with_content(content)
        .with_class(class_name)
        .with_settings(SettingsKind::Button(ButtonSettings {
            href: Some("#".to_string()),
            target: Some("_self".to_string()),
        }))
        .editable()
}

fn container(class_name: &str) -> ElementTemplate {
    ElementTemplate::new(ElementType::Container).with_class(class_name)
}

fn column() -> ElementTemplate {
    container("p-4 bg-gray-100 dark:bg-gray-800 rounded-lg min-h-32")
}

fn grid(columns: u32) -> ElementTemplate {
    ElementTemplate::new(ElementType::Grid)
        .with_class(format!("grid grid-cols-1 md:grid-cols-{} gap-6", columns))
        .with_settings(SettingsKind::Layout(LayoutSettings {
            columns: Some(columns),
            ..LayoutSettings::default()
        }))
        .editable()
        .with_children((0..columns).map(|_| column()))
}

fn image(class_name: &str, src: &str, alt: &str) -> ElementTemplate {
    ElementTemplate::new(ElementType::Image)
        .with_class(class_name)
        .with_settings(SettingsKind::Image(ImageSettings {
            src: Some(src.to_string()),
            alt: Some(alt.to_string()),
        }))
        .editable()
}

fn builtin_templates() -> Vec<ComponentTemplate> {
    vec![
        // Basic
        entry(
            "text-heading",
            "Heading",
            Category::Basic,
            "Add headings and titles",
            text("h2", "text-3xl font-bold text-gray-900 dark:text-gray-100", "Your Heading Here"),
        ),
        entry(
            "text-paragraph",
            "Paragraph",
            Category::Basic,
            "Add text content",
            text(
                "p",
                "text-base text-gray-700 dark:text-gray-300 leading-relaxed",
                "Your paragraph text goes here. Click to edit this content.",
            ),
        ),
        entry(
            "image-block",
            "Image",
            Category::Basic,
            "Add images and photos",
            image(
                "w-full h-auto rounded-lg shadow-md",
                "https://via.placeholder.com/600x400?text=Your+Image",
                "Placeholder image",
            )
            .with_style("maxWidth", "100%")
            .with_style("height", "auto"),
        ),
        entry(
            "button-primary",
            "Button",
            Category::Basic,
            "Call-to-action buttons",
            button(
                "bg-blue-600 hover:bg-blue-700 text-white font-semibold py-3 px-6 rounded-lg transition-colors duration-200",
                "Click Me",
            )
            .with_style("display", "inline-block"),
        ),
        // Layout
        entry(
            "container-section",
            "Section",
            Category::Layout,
            "Full-width content section",
            ElementTemplate::new(ElementType::Section)
                .with_class("py-16 px-4 bg-gray-50 dark:bg-gray-800")
                .with_style("width", "100%")
                .with_style("minHeight", "200px")
                .with_settings(SettingsKind::Layout(LayoutSettings {
                    container_max_width: Some("1200px".to_string()),
                    ..LayoutSettings::default()
                }))
                .editable(),
        ),
        entry(
            "container-box",
            "Container",
            Category::Layout,
            "Flexible container box",
            container(
                "p-6 bg-white dark:bg-gray-900 rounded-lg shadow-sm border border-gray-200 dark:border-gray-700",
            )
            .with_style("minHeight", "100px")
            .editable(),
        ),
        entry("grid-2col", "2 Column Grid", Category::Layout, "Two column layout", grid(2)),
        entry("grid-3col", "3 Column Grid", Category::Layout, "Three column layout", grid(3)),
        // Components
        entry(
            "hero-banner",
            "Hero Banner",
            Category::Components,
            "Large banner with text and CTA",
            ElementTemplate::new(ElementType::Hero)
                .with_class("bg-gradient-to-r from-blue-600 to-purple-600 text-white py-20 px-6 text-center")
                .editable()
                .with_child(container("max-w-4xl mx-auto").with_children([
                    text("h1", "text-5xl font-bold mb-6", "Welcome to Our Amazing Service"),
                    text(
                        "p",
                        "text-xl mb-8 opacity-90",
                        "We provide the best solutions for your business needs",
                    ),
                    button(
                        "bg-white text-blue-600 font-semibold py-3 px-8 rounded-lg hover:bg-gray-100 transition-colors duration-200",
                        "Get Started",
                    ),
                ])),
        ),
        entry(
            "card-basic",
            "Card",
            Category::Components,
            "Content card with image and text",
            ElementTemplate::new(ElementType::Card)
                .with_class("bg-white dark:bg-gray-900 rounded-lg shadow-lg overflow-hidden")
                .editable()
                .with_child(image(
                    "w-full h-48 object-cover",
                    "https://via.placeholder.com/400x200?text=Card+Image",
                    "Card image",
                ))
                .with_child(container("p-6").with_children([
                    text(
                        "h3",
                        "text-xl font-semibold mb-2 text-gray-900 dark:text-gray-100",
                        "Card Title",
                    ),
                    text(
                        "p",
                        "text-gray-600 dark:text-gray-400",
                        "This is a sample card description. Add your content here.",
                    ),
                ])),
        ),
        entry(
            "navigation-menu",
            "Navigation",
            Category::Components,
            "Website navigation menu",
            ElementTemplate::new(ElementType::Navigation)
                .with_class("bg-white dark:bg-gray-900 shadow-sm border-b border-gray-200 dark:border-gray-700")
                .editable()
                .with_child(
                    container("max-w-7xl mx-auto px-4 py-4 flex items-center justify-between")
                        .with_child(text(
                            "div",
                            "text-xl font-bold text-gray-900 dark:text-gray-100",
                            "Logo",
                        ))
                        .with_child(
                            container("hidden md:flex items-center space-x-8")
                                .with_children(["Home", "About", "Services", "Contact"].map(link)),
                        ),
                ),
        ),
        // Forms
        entry(
            "contact-form",
            "Contact Form",
            Category::Forms,
            "Contact form with fields",
            ElementTemplate::new(ElementType::Form)
                .with_class("bg-white dark:bg-gray-900 p-6 rounded-lg shadow-lg max-w-md")
                .with_style("width", "100%")
                .with_settings(SettingsKind::Form(FormSettings {
                    action: Some("/api/contact".to_string()),
                    method: Some("POST".to_string()),
                }))
                .editable()
                .with_child(text(
                    "h3",
                    "text-2xl font-bold mb-6 text-gray-900 dark:text-gray-100",
                    "Contact Us",
                )),
        ),
        // Pro
        entry(
            "testimonial-slider",
            "Testimonials",
            Category::Pro,
            "Customer testimonials slider",
            container("bg-gray-50 dark:bg-gray-800 py-16 px-6")
                .with_style("width", "100%")
                .editable(),
        ),
        entry(
            "pricing-table",
            "Pricing Table",
            Category::Pro,
            "Pricing plans comparison",
            container("bg-white dark:bg-gray-900 p-8 rounded-lg")
                .with_style("width", "100%")
                .editable(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_template_ids_unique() {
        let library = ComponentLibrary::new();
        let ids: HashSet<_> = library.templates().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), library.templates().len());
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn test_lookup_and_filters() {
        let library = ComponentLibrary::new();

        let grid = library.get("grid-3col").unwrap();
        assert_eq!(grid.template.children.len(), 3);

        let pro: Vec<_> = library.by_category(Category::Pro).collect();
        assert_eq!(pro.len(), 2);
        assert!(pro.iter().all(|t| t.is_pro));

        let found: Vec<_> = library.search("LAYOUT").map(|t| t.id).collect();
        assert_eq!(found, vec!["grid-2col", "grid-3col"]);
    }

    #[test]
    fn test_leaf_templates_have_no_children() {
        let library = ComponentLibrary::new();
        for entry in library.templates() {
            for leaf in all_nodes(&entry.template) {
                if !leaf.element_type.accepts_children() {
                    assert!(leaf.children.is_empty(), "{}", entry.id);
                }
                assert!(leaf.properties.settings.kind.fits(leaf.element_type), "{}", entry.id);
            }
        }
    }

    fn all_nodes(template: &ElementTemplate) -> Vec<&ElementTemplate> {
        let mut nodes = vec![template];
        for child in &template.children {
            nodes.extend(all_nodes(child));
        }
        nodes
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("forms"), Some(Category::Forms));
        assert_eq!(Category::parse("widgets"), None);
    }
}
