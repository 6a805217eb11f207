use crate::{
    core::{
        config::MapConfig,
        geo::{LatLng, Point},
        projection::Projection,
        transform::ViewTransform,
        viewport::Viewport,
    },
    data::{FeatureCollection, GeoFeature, RadiusScale},
    input::{
        controller::{RenderTarget, TransformController},
        events::{EventHandled, InputEvent},
    },
    layers::overlay::OverlayLayer,
    rendering::svg::render_svg,
    tiles::{layer::RasterLayer, resolver::TileResolver, source::TemplateSource},
    Result,
};

/// Which gestures the map reacts to
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub dragging: bool,
    pub scroll_wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub touch_zoom: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            dragging: true,
            scroll_wheel_zoom: true,
            double_click_zoom: true,
            touch_zoom: true,
        }
    }
}

impl MapOptions {
    fn allows(&self, event: &InputEvent) -> bool {
        if event.is_touch_event() {
            return self.touch_zoom;
        }
        match event {
            InputEvent::DragStart { .. } | InputEvent::Drag { .. } | InputEvent::DragEnd => {
                self.dragging
            }
            InputEvent::Wheel { .. } => self.scroll_wheel_zoom,
            InputEvent::DoubleClick { .. } => self.double_click_zoom,
            _ => true,
        }
    }
}

/// Everything redrawn on a transform change
pub struct Scene {
    viewport: Viewport,
    resolver: TileResolver,
    projection: Projection,
    raster: RasterLayer,
    overlay: OverlayLayer,
    render_count: u64,
}

impl RenderTarget for Scene {
    fn render(&mut self, transform: &ViewTransform) {
        self.projection = Projection::from_transform(transform);
        self.overlay.render(&self.projection);
        let tiles = self.resolver.tiles_for(&self.viewport, transform);
        self.raster.update(&tiles);
        self.render_count += 1;
        log::debug!(
            "render #{}: k={} x={:.1} y={:.1}",
            self.render_count,
            transform.k,
            transform.x,
            transform.y
        );
    }
}

/// A single map session: one feature collection, one view, one surface.
pub struct QuakeMap {
    options: MapOptions,
    min_size: Point,
    controller: TransformController,
    scene: Scene,
}

impl QuakeMap {
    /// Builds the map and performs the first render.
    ///
    /// The surface is sized to `window`, but never below the configured minimum.
    pub fn new(
        config: &MapConfig,
        window: Viewport,
        features: FeatureCollection,
        raster: RasterLayer,
    ) -> Result<Self> {
        config.validate()?;
        let view = &config.view;
        let min_size = Point::new(view.min_width, view.min_height);
        let viewport = Viewport::fit_window_with_min(window.width, window.height, min_size);

        let radius = RadiusScale::for_collection(&features, config.overlay.max_radius);
        let overlay = OverlayLayer::new(features, radius);

        let initial =
            TransformController::centered_transform(&viewport, &view.center(), view.default_scale);
        let controller = TransformController::new(initial, view.min_scale, view.max_scale);

        let mut scene = Scene {
            viewport,
            resolver: TileResolver::new(),
            projection: Projection::from_transform(&controller.transform()),
            raster,
            overlay,
            render_count: 0,
        };
        scene.render(&controller.transform());

        Ok(Self {
            options: MapOptions::default(),
            min_size,
            controller,
            scene,
        })
    }

    /// Map whose tiles are never downloaded
    pub fn offline(
        config: &MapConfig,
        window: Viewport,
        features: FeatureCollection,
    ) -> Result<Self> {
        let source = TemplateSource::from_config(&config.tiles);
        Self::new(config, window, features, RasterLayer::offline(Box::new(source)))
    }

    /// Map that downloads tiles over HTTP
    pub fn with_http_tiles(
        config: &MapConfig,
        window: Viewport,
        features: FeatureCollection,
    ) -> Result<Self> {
        let source = TemplateSource::from_config(&config.tiles);
        Self::new(config, window, features, RasterLayer::http(Box::new(source)))
    }

    /// Loads the configured feature collection and builds an HTTP-backed map.
    ///
    /// A load failure is returned as-is and no map is created.
    #[cfg(feature = "tokio-runtime")]
    pub async fn load(config: &MapConfig, window: Viewport) -> Result<Self> {
        let source = crate::data::source::source_for(&config.data.location);
        let features = crate::data::source::load_features(source.as_ref()).await?;
        Self::with_http_tiles(config, window, features)
    }

    pub fn set_options(&mut self, options: MapOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Routes one input event
    pub fn handle_event(&mut self, event: &InputEvent) -> EventHandled {
        if !self.options.allows(event) {
            return EventHandled::NotHandled;
        }
        match event {
            InputEvent::Resize { width, height } => {
                self.resize(*width, *height);
                EventHandled::Handled
            }
            InputEvent::PointerMove { position } => {
                match self.scene.overlay.pointer_move(position) {
                    Some(_) => EventHandled::Handled,
                    None => EventHandled::NotHandled,
                }
            }
            _ => self.controller.handle(event, &mut self.scene),
        }
    }

    /// Resizes the surface and redraws with the current transform
    pub fn resize(&mut self, window_width: f64, window_height: f64) {
        let viewport = Viewport::fit_window_with_min(window_width, window_height, self.min_size);
        if viewport != self.scene.viewport {
            self.scene.viewport = viewport;
            self.scene.render(&self.controller.transform());
        }
    }

    /// Multiplies the scale by `factor` around `focus`
    pub fn zoom_by(&mut self, factor: f64, focus: &Point) -> bool {
        self.controller.scale_by(factor, focus, &mut self.scene)
    }

    /// Moves the map by a screen-space delta
    pub fn pan_by(&mut self, delta: &Point) -> bool {
        self.controller.translate_by(delta, &mut self.scene)
    }

    /// Jumps to an explicit transform
    pub fn set_transform(&mut self, transform: ViewTransform) -> bool {
        self.controller.set_transform(transform, &mut self.scene)
    }

    /// Places tiles whose download finished; returns how many were placed
    pub fn poll_tiles(&mut self) -> usize {
        self.scene.raster.poll_loaded()
    }

    /// Registers the hover callback of the point overlay
    pub fn on_hover<F>(&mut self, callback: F)
    where
        F: FnMut(&GeoFeature) + Send + 'static,
    {
        self.scene.overlay.on_hover(callback);
    }

    pub fn transform(&self) -> ViewTransform {
        self.controller.transform()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.scene.viewport
    }

    pub fn projection(&self) -> &Projection {
        &self.scene.projection
    }

    /// Screen position of a coordinate under the current view
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        self.scene.projection.project(lat_lng)
    }

    /// Coordinate under a screen position
    pub fn invert(&self, pixel: &Point) -> LatLng {
        self.scene.projection.invert(pixel)
    }

    pub fn controller(&self) -> &TransformController {
        &self.controller
    }

    pub fn overlay(&self) -> &OverlayLayer {
        &self.scene.overlay
    }

    pub fn raster(&self) -> &RasterLayer {
        &self.scene.raster
    }

    /// Number of renders performed so far, including the initial one
    pub fn render_count(&self) -> u64 {
        self.scene.render_count
    }

    /// Serializes the current surface
    pub fn to_svg(&self) -> String {
        render_svg(&self.scene.viewport, &self.scene.raster, &self.scene.overlay)
    }
}
