use bevy::prelude::*;
use thiserror::Error;

/// One variant per gallery page; the active state decides which page is spawned.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum GalleryPage {
    #[default]
    Setup,
    Transform,
    Animation,
    Camera,
    Geometries,
    DebugUi,
    Texture,
    Material,
    ThreeDText,
    Lights,
    Shadow,
    HauntedHouse,
    SolarSystem,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

impl GalleryPage {
    /// Pages in sidebar order.
    pub const ALL: [GalleryPage; 13] = [
        Self::Setup,
        Self::Transform,
        Self::Animation,
        Self::Camera,
        Self::Geometries,
        Self::DebugUi,
        Self::Texture,
        Self::Material,
        Self::ThreeDText,
        Self::Lights,
        Self::Shadow,
        Self::HauntedHouse,
        Self::SolarSystem,
    ];

    /// Canonical URL path of the page.
    pub fn route(&self) -> &'static str {
        match self {
            Self::Setup => "/",
            Self::Transform => "/transform",
            Self::Animation => "/animation",
            Self::Camera => "/camera",
            Self::Geometries => "/geometries",
            Self::DebugUi => "/debug-ui",
            Self::Texture => "/texture",
            Self::Material => "/material",
            Self::ThreeDText => "/3d-text",
            Self::Lights => "/lights",
            Self::Shadow => "/shadow",
            Self::HauntedHouse => "/haunted-hause",
            Self::SolarSystem => "/solar-system",
        }
    }

    /// Label shown in the sidebar.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Setup => "Setup",
            Self::Transform => "Transform",
            Self::Animation => "Animation",
            Self::Camera => "Camera",
            Self::Geometries => "Geometries",
            Self::DebugUi => "Debug UI",
            Self::Texture => "Texture",
            Self::Material => "Material",
            Self::ThreeDText => "3D Text",
            Self::Lights => "Lights",
            Self::Shadow => "Shadow",
            Self::HauntedHouse => "Haunted Hause",
            Self::SolarSystem => "Solar System",
        }
    }

    /// Resolve a URL path. Leading/trailing slashes, query strings and
    /// fragments are ignored.
    pub fn from_route(route: &str) -> Result<Self, RouteError> {
        let path = route
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches('/')
            .to_lowercase();

        let page = match path.as_str() {
            "" | "setup" => Self::Setup,
            "transform" => Self::Transform,
            "animation" => Self::Animation,
            "camera" => Self::Camera,
            "geometries" => Self::Geometries,
            "debug-ui" => Self::DebugUi,
            "texture" => Self::Texture,
            "material" => Self::Material,
            "3d-text" => Self::ThreeDText,
            "lights" => Self::Lights,
            "shadow" => Self::Shadow,
            "haunted-hause" | "haunted-house" => Self::HauntedHouse,
            "solar-system" => Self::SolarSystem,
            _ => return Err(RouteError::UnknownRoute(route.to_string())),
        };
        Ok(page)
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    /// Next page in sidebar order, wrapping around.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous page in sidebar order, wrapping around.
    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Component)]
pub struct FpsText;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_round_trips_through_its_route() {
        for page in GalleryPage::ALL {
            assert_eq!(GalleryPage::from_route(page.route()), Ok(page));
        }
    }

    #[test]
    fn routes_tolerate_slashes_and_queries() {
        assert_eq!(GalleryPage::from_route("lights"), Ok(GalleryPage::Lights));
        assert_eq!(GalleryPage::from_route("/lights/"), Ok(GalleryPage::Lights));
        assert_eq!(
            GalleryPage::from_route("/solar-system?planet=earth"),
            Ok(GalleryPage::SolarSystem)
        );
        assert_eq!(GalleryPage::from_route(""), Ok(GalleryPage::Setup));
        assert_eq!(
            GalleryPage::from_route("/haunted-house"),
            Ok(GalleryPage::HauntedHouse)
        );
    }

    #[test]
    fn unknown_route_is_an_error() {
        let err = GalleryPage::from_route("/nowhere").unwrap_err();
        assert_eq!(err, RouteError::UnknownRoute("/nowhere".to_string()));
        assert_eq!(err.to_string(), "unknown route: /nowhere");
    }

    #[test]
    fn paging_wraps_in_both_directions() {
        assert_eq!(GalleryPage::Setup.previous(), GalleryPage::SolarSystem);
        assert_eq!(GalleryPage::SolarSystem.next(), GalleryPage::Setup);
        assert_eq!(GalleryPage::Texture.next(), GalleryPage::Material);
    }
}
