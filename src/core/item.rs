//! Showcase items browsed by the carousel.

/// One showcase entry.  Owned by the caller; the carousel only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselItem {
    pub id: String,
    /// Path (relative to the asset directory) or URL of the card artwork.
    pub image_ref: String,
    pub title: String,
    pub description: String,
}

impl CarouselItem {
    pub fn new(
        id: impl Into<String>,
        image_ref: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            image_ref: image_ref.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Built-in showcase used when the host supplies no list of its own.
pub fn showcase_items() -> Vec<CarouselItem> {
    vec![
        CarouselItem::new(
            "1",
            "project-images/project-1-wander.png",
            "Wander Blog Mockup",
            "Travel-focused editorial experience with map-first storytelling and clear content hierarchy.",
        ),
        CarouselItem::new(
            "2",
            "project-images/project-2-jzone-motorcycle-red.png",
            "J-Zone E-Commerce CMS",
            "Catalog and commerce system designed for precise inventory visibility and fast product discovery.",
        ),
        CarouselItem::new(
            "3",
            "project-images/jewelry-ecommerce-landing-page.png",
            "Jewelry Landing Experience",
            "A conversion-oriented product showcase balancing premium visuals with focused call-to-action flow.",
        ),
        CarouselItem::new(
            "4",
            "project-placeholder-4.svg",
            "Upcoming Case Study",
            "Placeholder module reserved for the next complete product build and documented design decisions.",
        ),
    ]
}
