//! Style resolution: the per-app → global → default theme cascade,
//! memoized brand colors, and action-icon compositing.

pub mod brand;
pub mod cache;

use std::sync::Arc;

use image::RgbaImage;
use island_image::compose::MAX_PADDING_PERCENT;
use island_image::{Color, IconShape, compose_on_shape};

use crate::config::theme::{ActionStyle, KeywordAction, ThemeConfig};
use crate::platform::{AppMetadata, Bitmap};

pub use cache::BrandColorCache;

/// Icon padding used when neither the app nor the global theme sets one.
pub const DEFAULT_ICON_PADDING: u8 = 20;

/// Side length of composited action icons.
pub const ACTION_ICON_SIZE: u32 = 96;

pub const DEFAULT_ANSWER_COLOR: Color = Color(0xFF34_C759);
pub const DEFAULT_DECLINE_COLOR: Color = Color(0xFFFF_3B30);

/// Fully resolved call button styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallButtonStyle {
    pub answer_color: Color,
    pub decline_color: Color,
    pub answer_shape: IconShape,
    pub decline_shape: IconShape,
}

/// Resolves theme values for an app. Cheap to clone; clones share the
/// brand-color cache.
#[derive(Clone)]
pub struct StyleResolver {
    metadata: Arc<dyn AppMetadata>,
    cache: Arc<BrandColorCache>,
}

impl StyleResolver {
    pub fn new(metadata: Arc<dyn AppMetadata>) -> Self {
        Self::with_cache(metadata, Arc::new(BrandColorCache::new()))
    }

    pub fn with_cache(metadata: Arc<dyn AppMetadata>, cache: Arc<BrandColorCache>) -> Self {
        Self { metadata, cache }
    }

    pub fn cache(&self) -> &Arc<BrandColorCache> {
        &self.cache
    }

    pub fn metadata(&self) -> &Arc<dyn AppMetadata> {
        &self.metadata
    }

    /// Highlight color for `app_id`.
    ///
    /// 1. per-app explicit color;
    /// 2. per-app `useAppColors == true` → brand color, else global color,
    ///    else `default`;
    /// 3. global `useAppColors` unless the app explicitly set it to
    ///    `false` → same chain as 2;
    /// 4. global color;
    /// 5. `default`.
    pub fn resolve_color(&self, theme: &ThemeConfig, app_id: &str, default: Color) -> Color {
        let global = &theme.global;
        let app = theme.app(app_id);
        let auto_chain = || {
            self.brand_color(app_id)
                .or(global.highlight_color)
                .unwrap_or(default)
        };

        if let Some(app) = app {
            if let Some(color) = app.highlight_color {
                return color;
            }
            if app.use_app_colors == Some(true) {
                return auto_chain();
            }
        }

        let app_opted_out = app.is_some_and(|a| a.use_app_colors == Some(false));
        if global.use_app_colors && !app_opted_out {
            return auto_chain();
        }

        global.highlight_color.unwrap_or(default)
    }

    /// Icon shape: per-app, else global, else circle.
    pub fn resolve_shape(&self, theme: &ThemeConfig, app_id: &str) -> IconShape {
        theme
            .app(app_id)
            .and_then(|a| a.icon_shape.as_deref())
            .and_then(IconShape::from_id)
            .or_else(|| theme.global.icon_shape.as_deref().and_then(IconShape::from_id))
            .unwrap_or_default()
    }

    /// Icon padding percent: per-app, else global, else the default.
    /// Capped at [`MAX_PADDING_PERCENT`].
    pub fn resolve_padding(&self, theme: &ThemeConfig, app_id: &str) -> u8 {
        theme
            .app(app_id)
            .and_then(|a| a.icon_padding)
            .or(theme.global.icon_padding)
            .unwrap_or(DEFAULT_ICON_PADDING)
            .min(MAX_PADDING_PERCENT)
    }

    /// Button style for an action title: first per-app keyword contained in
    /// the title (case-insensitive), else the first global one.
    pub fn resolve_action_style(
        &self,
        theme: &ThemeConfig,
        app_id: &str,
        action_title: &str,
    ) -> Option<ActionStyle> {
        let title = action_title.to_lowercase();
        theme
            .app(app_id)
            .and_then(|a| find_keyword(&a.actions, &title))
            .or_else(|| find_keyword(&theme.global.actions, &title))
            .cloned()
    }

    /// Answer / decline colors and shapes for call islands.
    pub fn resolve_call_style(&self, theme: &ThemeConfig, app_id: &str) -> CallButtonStyle {
        let app = theme.app(app_id).map(|a| &a.call);
        let global = &theme.global.call;
        let shape = |app_shape: Option<&String>, global_shape: Option<&String>| {
            app_shape
                .and_then(|s| IconShape::from_id(s))
                .or_else(|| global_shape.and_then(|s| IconShape::from_id(s)))
                .unwrap_or(IconShape::Circle)
        };

        CallButtonStyle {
            answer_color: app
                .and_then(|c| c.answer_color)
                .or(global.answer_color)
                .unwrap_or(DEFAULT_ANSWER_COLOR),
            decline_color: app
                .and_then(|c| c.decline_color)
                .or(global.decline_color)
                .unwrap_or(DEFAULT_DECLINE_COLOR),
            answer_shape: shape(
                app.and_then(|c| c.answer_shape.as_ref()),
                global.answer_shape.as_ref(),
            ),
            decline_shape: shape(
                app.and_then(|c| c.decline_shape.as_ref()),
                global.decline_shape.as_ref(),
            ),
        }
    }

    /// Memoized brand color extracted from the app's launcher icon.
    pub fn brand_color(&self, app_id: &str) -> Option<Color> {
        self.cache.get_or_compute(app_id, || {
            match self.metadata.launcher_icon(app_id) {
                Ok(icon) => {
                    let color = brand::extract_brand_color(&icon);
                    tracing::debug!(app_id, color = ?color, "Extracted brand color");
                    color
                }
                Err(e) => {
                    tracing::debug!(app_id, error = %e, "No launcher icon for brand color");
                    None
                }
            }
        })
    }

    /// Recolor `icon` to `tint` and composite it on a `shape` filled with
    /// `background`. Padding above [`MAX_PADDING_PERCENT`] is capped.
    /// Returns `None` if the icon cannot be composited.
    pub fn action_icon(
        &self,
        icon: &RgbaImage,
        tint: Color,
        background: Color,
        shape: IconShape,
        padding_percent: u8,
    ) -> Option<Bitmap> {
        let padding = padding_percent.min(MAX_PADDING_PERCENT);
        match compose_on_shape(icon, tint, background, shape, ACTION_ICON_SIZE, padding) {
            Ok(img) => Some(Arc::new(img)),
            Err(e) => {
                tracing::debug!(error = %e, "Action icon compositing failed");
                None
            }
        }
    }
}

fn find_keyword<'a>(actions: &'a [KeywordAction], title: &str) -> Option<&'a ActionStyle> {
    actions
        .iter()
        .find(|a| {
            let keyword = a.keyword.trim().to_lowercase();
            !keyword.is_empty() && title.contains(&keyword)
        })
        .map(|a| &a.style)
}
