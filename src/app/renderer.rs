// src/app/renderer.rs
//! Canvas への描画。
//!
//! まず Session から「何をどの順番で描くか」のリスト (`DrawCommand`) を作って、
//! それを 2D コンテキストに順番に描くだけ。リスト作りはブラウザなしでテストできる。

use std::collections::HashMap;

use log::warn;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::app::session::Session;
use crate::components::{Draggable, DrawOrder, Position, TargetZone, ZoneVisual};
use crate::config::layout::*;
use crate::config::Screen;
use crate::logic::Bounds;

/// 描画命令ひとつ分。並び順がそのまま重なり順 (後ろほど手前)。
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background,
    Map { bounds: Bounds },
    Object { name: String, bounds: Bounds },
    /// `x`, `y` は枠線を含まない正方形の左上。
    Zone { x: f32, y: f32, size: f32, border_width: f32, visual: ZoneVisual },
    SubmitButton { bounds: Bounds },
    Text { text: String, x: f32, y: f32, font: &'static str },
}

/// ゾーンの塗りと線の色。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneStyle {
    pub fill: &'static str,
    pub fill_alpha: f64,
    pub stroke: &'static str,
    /// `None` ならゾーン自身の枠線の太さを使う
    pub line_width: Option<f64>,
}

pub fn zone_style(visual: ZoneVisual) -> ZoneStyle {
    match visual {
        ZoneVisual::Neutral => ZoneStyle {
            fill: ZONE_FILL_COLOR,
            fill_alpha: ZONE_FILL_ALPHA,
            stroke: ZONE_BORDER_COLOR,
            line_width: None,
        },
        ZoneVisual::Highlighted => ZoneStyle {
            fill: ZONE_FILL_COLOR,
            fill_alpha: ZONE_HIGHLIGHT_FILL_ALPHA,
            stroke: ZONE_HIGHLIGHT_BORDER_COLOR,
            line_width: None,
        },
        ZoneVisual::Correct => ZoneStyle {
            fill: ZONE_CORRECT_COLOR,
            fill_alpha: ZONE_RESULT_ALPHA,
            stroke: ZONE_CORRECT_COLOR,
            line_width: Some(ZONE_RESULT_BORDER_WIDTH),
        },
        ZoneVisual::Incorrect => ZoneStyle {
            fill: ZONE_INCORRECT_COLOR,
            fill_alpha: ZONE_RESULT_ALPHA,
            stroke: ZONE_INCORRECT_COLOR,
            line_width: Some(ZONE_RESULT_BORDER_WIDTH),
        },
    }
}

/// 描画リストを作る。
///
/// 順番: 背景 → マップ → オブジェクト (DrawOrder 順) → ゾーン → 送信ボタン → 文字。
/// `map_size` はマップ画像の元の大きさ。まだ読み込めてなければ `None`。
pub fn build_render_list(session: &Session, map_size: Option<(f32, f32)>) -> Vec<DrawCommand> {
    let world = session.world();
    let screen = session.screen();
    let mut commands = vec![DrawCommand::Background];

    if let Some((w, h)) = map_size {
        commands.push(DrawCommand::Map { bounds: screen.map_bounds(w, h) });
    }

    let mut objects: Vec<(DrawOrder, _, DrawCommand)> = world
        .get_all_entities_with_component::<Draggable>()
        .into_iter()
        .filter_map(|entity| {
            let draggable = world.get_component::<Draggable>(entity)?;
            let position = world.get_component::<Position>(entity)?;
            let order = world.get_component::<DrawOrder>(entity).copied().unwrap_or(DrawOrder(0));
            Some((
                order,
                entity,
                DrawCommand::Object {
                    name: draggable.name.clone(),
                    bounds: draggable.bounds_at(position),
                },
            ))
        })
        .collect();
    objects.sort_by_key(|(order, entity, _)| (*order, *entity));
    commands.extend(objects.into_iter().map(|(_, _, cmd)| cmd));

    for &zone_entity in session.controller().zones() {
        if let Some(zone) = world.get_component::<TargetZone>(zone_entity) {
            commands.push(DrawCommand::Zone {
                x: zone.center.x - zone.size / 2.0,
                y: zone.center.y - zone.size / 2.0,
                size: zone.size,
                border_width: zone.border_width,
                visual: zone.visual(),
            });
        }
    }

    if session.submit_visible() {
        commands.push(DrawCommand::SubmitButton { bounds: screen.submit_button_bounds() });
    }

    let font = if session.evaluation().is_some() { SCORE_FONT } else { INSTRUCTIONS_FONT };
    commands.extend(session.status_message().lines().enumerate().map(|(i, line)| {
        DrawCommand::Text {
            text: line.trim_end().to_string(),
            x: INSTRUCTIONS_X,
            y: INSTRUCTIONS_Y + i as f32 * INSTRUCTIONS_LINE_HEIGHT,
            font,
        }
    }));

    commands
}

/// 2D コンテキストと読み込み済みの画像を持って、実際に描く係。
pub struct Renderer {
    context: CanvasRenderingContext2d,
    screen: Screen,
    map_image: Option<HtmlImageElement>,
    object_images: HashMap<String, HtmlImageElement>,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d, screen: Screen) -> Self {
        Renderer {
            context,
            screen,
            map_image: None,
            object_images: HashMap::new(),
        }
    }

    pub fn set_map_image(&mut self, image: HtmlImageElement) {
        self.map_image = Some(image);
    }

    pub fn add_object_image(&mut self, name: impl Into<String>, image: HtmlImageElement) {
        self.object_images.insert(name.into(), image);
    }

    fn map_size(&self) -> Option<(f32, f32)> {
        self.map_image
            .as_ref()
            .map(|img| (img.natural_width() as f32, img.natural_height() as f32))
    }

    pub fn render(&self, session: &Session) -> Result<(), JsValue> {
        for command in build_render_list(session, self.map_size()) {
            self.draw(&command)?;
        }
        Ok(())
    }

    fn draw(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.set_global_alpha(1.0);
        match command {
            DrawCommand::Background => {
                ctx.set_fill_style_str(BACKGROUND_COLOR);
                ctx.fill_rect(0.0, 0.0, self.screen.width as f64, self.screen.height as f64);
            }
            DrawCommand::Map { bounds } => {
                if let Some(image) = &self.map_image {
                    draw_image(ctx, image, bounds)?;
                }
            }
            DrawCommand::Object { name, bounds } => match self.object_images.get(name) {
                Some(image) => draw_image(ctx, image, bounds)?,
                None => warn!("Renderer: no image for {:?}", name),
            },
            DrawCommand::Zone { x, y, size, border_width, visual } => {
                let style = zone_style(*visual);
                let (x, y, size) = (*x as f64, *y as f64, *size as f64);
                ctx.set_global_alpha(style.fill_alpha);
                ctx.set_fill_style_str(style.fill);
                ctx.fill_rect(x, y, size, size);
                ctx.set_global_alpha(1.0);
                ctx.set_stroke_style_str(style.stroke);
                ctx.set_line_width(style.line_width.unwrap_or(*border_width as f64));
                ctx.stroke_rect(x, y, size, size);
            }
            DrawCommand::SubmitButton { bounds } => {
                rounded_rect_path(ctx, bounds, SUBMIT_BUTTON_RADIUS)?;
                ctx.set_fill_style_str(SUBMIT_BUTTON_COLOR);
                ctx.fill();
                ctx.set_fill_style_str(SUBMIT_BUTTON_TEXT_COLOR);
                ctx.set_font(SUBMIT_BUTTON_FONT);
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.fill_text(
                    "Submit",
                    (bounds.x + bounds.width / 2.0) as f64,
                    (bounds.y + bounds.height / 2.0) as f64,
                )?;
            }
            DrawCommand::Text { text, x, y, font } => {
                ctx.set_fill_style_str(TEXT_COLOR);
                ctx.set_font(font);
                ctx.set_text_align("left");
                ctx.set_text_baseline("top");
                ctx.fill_text(text, *x as f64, *y as f64)?;
            }
        }
        Ok(())
    }
}

fn draw_image(ctx: &CanvasRenderingContext2d, image: &HtmlImageElement, bounds: &Bounds) -> Result<(), JsValue> {
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        image,
        bounds.x as f64,
        bounds.y as f64,
        bounds.width as f64,
        bounds.height as f64,
    )
}

/// 角丸の四角形のパスを作る (塗りは呼び出し側)。
fn rounded_rect_path(ctx: &CanvasRenderingContext2d, bounds: &Bounds, radius: f64) -> Result<(), JsValue> {
    let (x, y) = (bounds.x as f64, bounds.y as f64);
    let (right, bottom) = (bounds.right() as f64, bounds.bottom() as f64);
    ctx.begin_path();
    ctx.move_to(x + radius, y);
    ctx.arc_to(right, y, right, bottom, radius)?;
    ctx.arc_to(right, bottom, x, bottom, radius)?;
    ctx.arc_to(x, bottom, x, y, radius)?;
    ctx.arc_to(x, y, right, y, radius)?;
    ctx.close_path();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EntityDescriptor, Manifest, ZoneDescriptor};

    fn session() -> Session {
        let manifest = Manifest::new(
            vec![EntityDescriptor::new("guitar", 1), EntityDescriptor::new("vase", 2)],
            vec![
                ZoneDescriptor::new(1, 700.0, 200.0, 100.0),
                ZoneDescriptor::new(2, 850.0, 200.0, 100.0),
            ],
        );
        let mut session = Session::new(manifest, Screen::new(1000.0, 800.0)).unwrap();
        session.register_entity("guitar", 40.0, 40.0).unwrap();
        session.register_entity("vase", 40.0, 40.0).unwrap();
        session
    }

    fn object_names(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Object { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn layers_are_in_order() {
        let commands = build_render_list(&session(), Some((800.0, 600.0)));
        assert_eq!(commands[0], DrawCommand::Background);
        assert!(matches!(commands[1], DrawCommand::Map { .. }));
        assert!(matches!(commands[2], DrawCommand::Object { .. }));
        assert!(matches!(commands[4], DrawCommand::Zone { .. }));
        assert!(matches!(commands.last(), Some(DrawCommand::Text { .. })));
        // ボタンはまだ出てない
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::SubmitButton { .. })));
    }

    #[test]
    fn grabbed_object_is_drawn_last() {
        let mut session = session();
        assert_eq!(object_names(&build_render_list(&session, None)), vec!["guitar", "vase"]);

        let guitar = session.entity_by_name("guitar").unwrap();
        let p = *session.world().get_component::<Position>(guitar).unwrap();
        session.pointer_down(p.x, p.y);
        session.pointer_up();
        assert_eq!(object_names(&build_render_list(&session, None)), vec!["vase", "guitar"]);
    }

    #[test]
    fn instruction_lines_are_split() {
        let commands = build_render_list(&session(), None);
        let lines = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count();
        assert_eq!(lines, INSTRUCTIONS_TEXT.lines().count());
    }

    #[test]
    fn result_styles_use_thin_coloured_borders() {
        assert_eq!(zone_style(ZoneVisual::Correct).stroke, ZONE_CORRECT_COLOR);
        assert_eq!(zone_style(ZoneVisual::Incorrect).line_width, Some(ZONE_RESULT_BORDER_WIDTH));
        assert_eq!(zone_style(ZoneVisual::Neutral).line_width, None);
        assert!(zone_style(ZoneVisual::Highlighted).fill_alpha > zone_style(ZoneVisual::Neutral).fill_alpha);
    }
}
