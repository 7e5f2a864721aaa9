//! JSON input formats.
//!
//! Two shapes are accepted:
//! - an authoring scene (`{"artboards": [...]}`) with named types and
//!   properties, built into a [`Document`](crate::model::Document) through
//!   the [`GraphBuilder`];
//! - a flat record list (`{"objects": [...]}`), see [`records`].
//!
//! # Scene example
//!
//! ```rust
//! use rivpack::scene::{build_scene, parse_scene};
//!
//! let scene = parse_scene(r##"{
//!     "artboards": [{
//!         "name": "Main", "width": 200, "height": 100,
//!         "objects": [
//!             {"id": "box", "type": "rectangle", "width": 100, "height": 50},
//!             {"id": "paint", "type": "fill", "parent": "box"},
//!             {"type": "solid_color", "parent": "paint", "color": "#ff0000"}
//!         ],
//!         "animations": [{
//!             "name": "slide", "fps": 60, "duration": 60,
//!             "tracks": [{"object": "box", "property": "x", "keyframes": [
//!                 {"frame": 0, "value": 0},
//!                 {"frame": 60, "value": 100, "interpolation": "cubic"}
//!             ]}]
//!         }]
//!     }]
//! }"##).unwrap();
//!
//! let built = build_scene(&scene).unwrap();
//! assert_eq!(built.report.wrappers_inserted, 1);
//! ```

pub mod records;

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug_span, warn};

use crate::error::SceneError;
use crate::model::{parse_color, Built, GraphBuilder, LocalId, ObjectRecord, Value};
use crate::registry::{self, keys, types, WireKind};

/// Either JSON input shape.
#[derive(Debug, Clone)]
pub enum JsonDocument {
    Scene(Scene),
    Records(Vec<ObjectRecord>),
}

/// Parses JSON text as a scene or, if it has `objects` but no `artboards`,
/// as a record list.
pub fn parse_json_document(text: &str) -> Result<JsonDocument, SceneError> {
    let value: JsonValue = serde_json::from_str(text)?;
    if value.get("objects").is_some() && value.get("artboards").is_none() {
        Ok(JsonDocument::Records(records::records_from_json_value(value)?))
    } else {
        Ok(JsonDocument::Scene(serde_json::from_value(value)?))
    }
}

/// Parses an authoring scene.
pub fn parse_scene(text: &str) -> Result<Scene, SceneError> {
    Ok(serde_json::from_str(text)?)
}

/// Builds a document from a scene.
///
/// Unknown type names, unknown property names and references to unknown
/// objects are logged and counted in the build report. Values that do not
/// fit their property and malformed state machines are errors.
pub fn build_scene(scene: &Scene) -> Result<Built, SceneError> {
    let _span = debug_span!("build_scene", artboards = scene.artboards.len()).entered();
    let mut builder = GraphBuilder::new();
    for (index, artboard) in scene.artboards.iter().enumerate() {
        ArtboardBuild::new(&mut builder, index).build(artboard)?;
    }
    Ok(builder.finish())
}

/// Converts a JSON value to a property value of `kind`.
pub(crate) fn value_from_json(kind: WireKind, json: &JsonValue) -> Result<Value, String> {
    let value = match kind {
        WireKind::Float => match json {
            JsonValue::Number(n) => n.as_f64().map(|v| Value::Float(v as f32)),
            JsonValue::Bool(b) => Some(Value::Float(if *b { 1.0 } else { 0.0 })),
            _ => None,
        },
        WireKind::Uint => json
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .or_else(|| json.as_bool().map(u32::from))
            .map(Value::Uint),
        WireKind::Bool => json
            .as_bool()
            .or_else(|| match json.as_u64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            })
            .map(Value::Bool),
        WireKind::Color => match json {
            JsonValue::String(s) => parse_color(s),
            _ => json.as_u64().and_then(|v| u32::try_from(v).ok()),
        }
        .map(Value::Color),
        WireKind::String => json.as_str().map(|s| Value::String(s.to_owned())),
    };
    value.ok_or_else(|| format!("expected {} value, found {json}", kind_name(kind)))
}

fn kind_name(kind: WireKind) -> &'static str {
    match kind {
        WireKind::Uint => "uint",
        WireKind::Float => "float",
        WireKind::Color => "color",
        WireKind::String => "string",
        WireKind::Bool => "bool",
    }
}

pub(crate) fn shape_error(context: impl Into<String>, message: impl Into<String>) -> SceneError {
    SceneError::Shape {
        context: context.into(),
        message: message.into(),
    }
}

// =========================================================================
// Building
// =========================================================================

struct ArtboardBuild<'a> {
    builder: &'a mut GraphBuilder,
    index: usize,
    ids: FxHashMap<String, LocalId>,
}

impl<'a> ArtboardBuild<'a> {
    fn new(builder: &'a mut GraphBuilder, index: usize) -> Self {
        Self {
            builder,
            index,
            ids: FxHashMap::default(),
        }
    }

    fn context(&self, what: impl std::fmt::Display) -> String {
        format!("artboard {} {what}", self.index)
    }

    fn build(mut self, artboard: &SceneArtboard) -> Result<(), SceneError> {
        let root = self
            .builder
            .add_object(types::ARTBOARD)
            .map_err(|err| shape_error(self.context("root"), err.to_string()))?;
        self.set_properties(root, types::ARTBOARD, &artboard.properties, "root")?;

        // Every object gets its id before any parent is resolved, so parents
        // may appear after their children.
        let mut created: Vec<Option<(LocalId, u16)>> = Vec::with_capacity(artboard.objects.len());
        for (i, object) in artboard.objects.iter().enumerate() {
            let Some(def) = registry::type_by_scene_name(&object.type_name) else {
                warn!(artboard = self.index, object = i, type_name = %object.type_name, "unknown object type, skipped");
                self.builder.note_skipped_type();
                created.push(None);
                continue;
            };
            let local = self
                .builder
                .add_object(def.tag)
                .map_err(|err| shape_error(self.context(format!("object {i}")), err.to_string()))?;
            if let Some(id) = &object.id {
                if self.ids.insert(id.key(), local).is_some() {
                    return Err(shape_error(
                        self.context(format!("object {i}")),
                        format!("duplicate id {:?}", id.key()),
                    ));
                }
            }
            created.push(Some((local, def.tag)));
        }

        for (i, (object, created)) in artboard.objects.iter().zip(created).enumerate() {
            let Some((local, tag)) = created else {
                continue;
            };
            let parent = match &object.parent {
                None => Some(root),
                Some(id) => self.resolve(id, format!("object {i} parent")),
            };
            if let Some(parent) = parent {
                self.builder
                    .set_parent(local, parent)
                    .map_err(|err| shape_error(self.context(format!("object {i}")), err.to_string()))?;
            }
            self.set_properties(local, tag, &object.properties, &format!("object {i}"))?;
        }

        let animation_names: Vec<Option<&str>> = artboard
            .animations
            .iter()
            .map(|a| a.properties.get("name").and_then(JsonValue::as_str))
            .collect();
        for (i, animation) in artboard.animations.iter().enumerate() {
            self.build_animation(i, animation)?;
        }
        for (i, machine) in artboard.state_machines.iter().enumerate() {
            self.build_state_machine(i, machine, &animation_names)?;
        }
        Ok(())
    }

    fn resolve(&mut self, id: &SceneId, what: String) -> Option<LocalId> {
        let local = self.ids.get(&id.key()).copied();
        if local.is_none() {
            warn!(artboard = self.index, id = %id.key(), what = %what, "reference to unknown object");
            self.builder.note_unresolved_link();
        }
        local
    }

    fn add(&mut self, tag: u16, what: &str) -> Result<LocalId, SceneError> {
        self.builder
            .add_object(tag)
            .map_err(|err| shape_error(self.context(what), err.to_string()))
    }

    fn set(&mut self, id: LocalId, key: u16, value: Value, what: &str) -> Result<(), SceneError> {
        self.builder
            .set_property(id, key, value)
            .map_err(|err| shape_error(self.context(what), err.to_string()))
    }

    fn set_properties(
        &mut self,
        id: LocalId,
        tag: u16,
        properties: &BTreeMap<String, JsonValue>,
        what: &str,
    ) -> Result<(), SceneError> {
        for (name, json) in properties {
            let Some(key) = registry::property_key_for(tag, name) else {
                warn!(
                    artboard = self.index,
                    what,
                    property = %name,
                    type_name = registry::display_name_of(tag),
                    "unknown property, ignored"
                );
                self.builder.note_unknown_property();
                continue;
            };
            if registry::is_reference_key(key) {
                let target = serde_json::from_value::<SceneId>(json.clone()).map_err(|_| {
                    shape_error(self.context(what), format!("{name}: expected object id, found {json}"))
                })?;
                if let Some(local) = self.resolve(&target, format!("{what} {name}")) {
                    self.set(id, key, Value::Uint(local), what)?;
                }
                continue;
            }
            let value = value_from_json(registry::wire_kind_of(key), json)
                .map_err(|message| shape_error(self.context(what), format!("{name}: {message}")))?;
            self.set(id, key, value, what)?;
        }
        Ok(())
    }

    fn build_animation(&mut self, index: usize, animation: &SceneAnimation) -> Result<(), SceneError> {
        let what = format!("animation {index}");
        let id = self.add(types::LINEAR_ANIMATION, &what)?;
        self.set_properties(id, types::LINEAR_ANIMATION, &animation.properties, &what)?;

        // Tracks on the same object share one keyed object, in order of the
        // object's first track.
        let mut groups: Vec<(LocalId, Vec<&SceneTrack>)> = Vec::new();
        for track in &animation.tracks {
            let Some(target) = self.resolve(&track.object, format!("{what} track")) else {
                continue;
            };
            match groups.iter_mut().find(|(t, _)| *t == target) {
                Some((_, tracks)) => tracks.push(track),
                None => groups.push((target, vec![track])),
            }
        }

        for (target, tracks) in groups {
            let target_tag = self
                .builder
                .object(target)
                .map(|bag| bag.type_tag)
                .unwrap_or_default();
            let keyed = self.add(types::KEYED_OBJECT, &what)?;
            self.set(keyed, keys::KEYED_OBJECT_ID, Value::Uint(target), &what)?;
            for track in tracks {
                let Some(key) = registry::property_key_for(target_tag, &track.property) else {
                    warn!(
                        artboard = self.index,
                        animation = index,
                        property = %track.property,
                        "track targets unknown property, skipped"
                    );
                    self.builder.note_unknown_property();
                    continue;
                };
                let keyed_property = self.add(types::KEYED_PROPERTY, &what)?;
                self.set(keyed_property, keys::KEYED_PROPERTY_KEY, Value::Uint(key as u32), &what)?;
                let (tag, value_key, kind) = if registry::wire_kind_of(key) == WireKind::Color {
                    (types::KEYFRAME_COLOR, keys::KEYFRAME_COLOR_VALUE, WireKind::Color)
                } else {
                    (types::KEYFRAME_DOUBLE, keys::KEYFRAME_DOUBLE_VALUE, WireKind::Float)
                };
                for keyframe in &track.keyframes {
                    let value = value_from_json(kind, &keyframe.value).map_err(|message| {
                        shape_error(self.context(&what), format!("{}: {message}", track.property))
                    })?;
                    let frame = self.add(tag, &what)?;
                    self.set(frame, keys::KEYFRAME_FRAME, Value::Uint(keyframe.frame), &what)?;
                    self.set(
                        frame,
                        keys::KEYFRAME_INTERPOLATION_TYPE,
                        Value::Uint(keyframe.interpolation.code()),
                        &what,
                    )?;
                    self.set(frame, value_key, value, &what)?;
                }
            }
        }
        Ok(())
    }

    fn build_state_machine(
        &mut self,
        index: usize,
        machine: &SceneStateMachine,
        animations: &[Option<&str>],
    ) -> Result<(), SceneError> {
        let what = format!("state machine {index}");
        let id = self.add(types::STATE_MACHINE, &what)?;
        if let Some(name) = &machine.name {
            self.set(id, keys::STATE_MACHINE_NAME, Value::String(name.clone()), &what)?;
        }

        for input in &machine.inputs {
            let (tag, name, value) = match input {
                SceneInput::Number { name, value } => (
                    types::STATE_MACHINE_NUMBER,
                    name,
                    Some(Value::Float(*value as f32)),
                ),
                SceneInput::Bool { name, value } => {
                    (types::STATE_MACHINE_BOOL, name, Some(Value::Bool(*value)))
                }
                SceneInput::Trigger { name } => (types::STATE_MACHINE_TRIGGER, name, None),
            };
            let input_id = self.add(tag, &what)?;
            self.set(input_id, keys::STATE_MACHINE_NAME, Value::String(name.clone()), &what)?;
            if let Some(value) = value {
                let key = match tag {
                    types::STATE_MACHINE_NUMBER => keys::STATE_MACHINE_NUMBER_VALUE,
                    _ => keys::STATE_MACHINE_BOOL_VALUE,
                };
                self.set(input_id, key, value, &what)?;
            }
        }

        for (l, layer) in machine.layers.iter().enumerate() {
            let layer_what = format!("{what} layer {l}");
            let layer_id = self.add(types::STATE_MACHINE_LAYER, &layer_what)?;
            if let Some(name) = &layer.name {
                self.set(layer_id, keys::STATE_MACHINE_NAME, Value::String(name.clone()), &layer_what)?;
            }
            for transition in &layer.transitions {
                if transition.from >= layer.states.len() || transition.to >= layer.states.len() {
                    return Err(shape_error(
                        self.context(&layer_what),
                        format!(
                            "transition {} -> {} outside {} states",
                            transition.from,
                            transition.to,
                            layer.states.len()
                        ),
                    ));
                }
            }

            // Transitions follow the state they leave.
            for (s, state) in layer.states.iter().enumerate() {
                match state {
                    SceneState::Entry => {
                        self.add(types::ENTRY_STATE, &layer_what)?;
                    }
                    SceneState::Exit => {
                        self.add(types::EXIT_STATE, &layer_what)?;
                    }
                    SceneState::Any => {
                        self.add(types::ANY_STATE, &layer_what)?;
                    }
                    SceneState::Animation { animation } => {
                        let position = animations
                            .iter()
                            .position(|name| *name == Some(animation.as_str()))
                            .ok_or_else(|| {
                                shape_error(
                                    self.context(&layer_what),
                                    format!("state {s} plays unknown animation {animation:?}"),
                                )
                            })?;
                        let state_id = self.add(types::ANIMATION_STATE, &layer_what)?;
                        self.set(
                            state_id,
                            keys::ANIMATION_STATE_ANIMATION_ID,
                            Value::Uint(position as u32),
                            &layer_what,
                        )?;
                    }
                }
                for transition in layer.transitions.iter().filter(|t| t.from == s) {
                    let transition_id = self.add(types::STATE_TRANSITION, &layer_what)?;
                    self.set(
                        transition_id,
                        keys::TRANSITION_STATE_TO_ID,
                        Value::Uint(transition.to as u32),
                        &layer_what,
                    )?;
                    if transition.flags != 0 {
                        self.set(transition_id, keys::TRANSITION_FLAGS, Value::Uint(transition.flags), &layer_what)?;
                    }
                    if transition.duration != 0 {
                        self.set(
                            transition_id,
                            keys::TRANSITION_DURATION,
                            Value::Uint(transition.duration),
                            &layer_what,
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}

// =========================================================================
// JSON schema (serde)
// =========================================================================

/// An authoring scene.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub artboards: Vec<SceneArtboard>,
}

/// One artboard. Any other field is an artboard property (`name`, `width`,
/// `height`, `x`, `y`, `originX`, `originY`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneArtboard {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub animations: Vec<SceneAnimation>,
    #[serde(default, rename = "stateMachines")]
    pub state_machines: Vec<SceneStateMachine>,
    #[serde(flatten)]
    pub properties: BTreeMap<String, JsonValue>,
}

/// Authoring id: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SceneId {
    Number(u64),
    Name(String),
}

impl SceneId {
    fn key(&self) -> String {
        match self {
            SceneId::Number(n) => n.to_string(),
            SceneId::Name(s) => s.clone(),
        }
    }
}

/// One object. Without `parent` it belongs to the artboard directly; any
/// other field is a property of its type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    #[serde(default)]
    pub id: Option<SceneId>,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub parent: Option<SceneId>,
    #[serde(flatten)]
    pub properties: BTreeMap<String, JsonValue>,
}

/// A linear animation. Any other field is an animation property (`name`,
/// `fps`, `duration`, `speed`, `loop`, `workStart`, `workEnd`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneAnimation {
    #[serde(default)]
    pub tracks: Vec<SceneTrack>,
    #[serde(flatten)]
    pub properties: BTreeMap<String, JsonValue>,
}

/// Keyframes for one property of one object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneTrack {
    pub object: SceneId,
    pub property: String,
    #[serde(default)]
    pub keyframes: Vec<SceneKeyframe>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneKeyframe {
    pub frame: u32,
    pub value: JsonValue,
    #[serde(default)]
    pub interpolation: Interpolation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Hold,
    #[default]
    Linear,
    Cubic,
}

impl Interpolation {
    /// Returns the interpolation type written to keyframes.
    pub fn code(self) -> u32 {
        match self {
            Interpolation::Hold => 0,
            Interpolation::Linear => 1,
            Interpolation::Cubic => 2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneStateMachine {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<SceneInput>,
    #[serde(default)]
    pub layers: Vec<SceneLayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneInput {
    Number {
        name: String,
        #[serde(default)]
        value: f64,
    },
    Bool {
        name: String,
        #[serde(default)]
        value: bool,
    },
    Trigger {
        name: String,
    },
}

/// A layer; transitions name states by their index in `states`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneLayer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub states: Vec<SceneState>,
    #[serde(default)]
    pub transitions: Vec<SceneTransition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneState {
    Entry,
    Exit,
    Any,
    Animation { animation: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneTransition {
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub flags: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyBag;

    fn build(text: &str) -> Built {
        build_scene(&parse_scene(text).unwrap()).unwrap()
    }

    fn tags(built: &Built) -> Vec<u16> {
        built.document.objects().iter().map(|b| b.type_tag).collect()
    }

    fn find(built: &Built, tag: u16) -> &PropertyBag {
        built
            .document
            .objects()
            .iter()
            .find(|b| b.type_tag == tag)
            .unwrap()
    }

    #[test]
    fn test_forward_parent_reference() {
        let built = build(
            r#"{"artboards": [{"width": 10, "height": 10, "objects": [
                {"id": "fill", "type": "fill", "parent": "shape"},
                {"id": "shape", "type": "shape"}
            ]}]}"#,
        );
        assert_eq!(tags(&built), vec![types::ARTBOARD, types::FILL, types::SHAPE]);
        assert_eq!(find(&built, types::FILL).parent_id, Some(2));
        assert_eq!(find(&built, types::SHAPE).parent_id, Some(0));
        assert_eq!(
            find(&built, types::ARTBOARD).get(keys::ARTBOARD_WIDTH),
            Some(&Value::Float(10.0))
        );
    }

    #[test]
    fn test_paths_are_wrapped() {
        let built = build(
            r##"{"artboards": [{"objects": [
                {"id": 1, "type": "ellipse", "width": 20, "height": 20},
                {"type": "fill", "parent": 1},
                {"type": "vertex", "parent": 1, "x": 3}
            ]}]}"##,
        );
        assert_eq!(built.report.wrappers_inserted, 1);
        let shape = find(&built, types::SHAPE).local_id;
        assert_eq!(find(&built, types::FILL).parent_id, Some(shape));
        let ellipse = find(&built, types::ELLIPSE).local_id;
        assert_eq!(find(&built, types::STRAIGHT_VERTEX).parent_id, Some(ellipse));
    }

    #[test]
    fn test_unknown_names_are_counted() {
        let built = build(
            r#"{"artboards": [{"objects": [
                {"id": "a", "type": "hologram"},
                {"type": "node", "parent": "a", "sparkle": 1, "x": 2}
            ]}]}"#,
        );
        assert_eq!(built.report.skipped_types, 1);
        assert_eq!(built.report.unresolved_links, 1);
        assert_eq!(built.report.unknown_properties, 1);
        let node = find(&built, types::NODE);
        assert_eq!(node.parent_id, None);
        assert_eq!(node.get(keys::NODE_X), Some(&Value::Float(2.0)));
    }

    #[test]
    fn test_colors() {
        let built = build(
            r##"{"artboards": [{"objects": [
                {"type": "solid_color", "color": "#11223344"},
                {"type": "gradient_stop", "color": 4278190335, "position": 0.5}
            ]}]}"##,
        );
        assert_eq!(
            find(&built, types::SOLID_COLOR).get(keys::SOLID_COLOR_VALUE),
            Some(&Value::Color(0x4433_2211))
        );
        assert_eq!(
            find(&built, types::GRADIENT_STOP).get(keys::GRADIENT_STOP_COLOR),
            Some(&Value::Color(0xFF00_00FF))
        );
    }

    #[test]
    fn test_mistyped_value_is_an_error() {
        let scene = parse_scene(r#"{"artboards": [{"objects": [{"type": "node", "x": "left"}]}]}"#)
            .unwrap();
        let err = build_scene(&scene).unwrap_err();
        assert!(err.to_string().contains("x: expected float"));
    }

    #[test]
    fn test_animation_tracks() {
        let built = build(
            r##"{"artboards": [{"objects": [
                {"id": "n", "type": "node"},
                {"id": "c", "type": "solid_color"}
            ], "animations": [{"name": "go", "fps": 30, "tracks": [
                {"object": "n", "property": "x", "keyframes": [{"frame": 0, "value": 1}]},
                {"object": "c", "property": "color", "keyframes": [{"frame": 5, "value": "#ffffff", "interpolation": "hold"}]},
                {"object": "n", "property": "y", "keyframes": [{"frame": 0, "value": 2}]},
                {"object": "ghost", "property": "x", "keyframes": []}
            ]}]}]}"##,
        );
        assert_eq!(
            tags(&built)[3..].to_vec(),
            vec![
                types::LINEAR_ANIMATION,
                types::KEYED_OBJECT,
                types::KEYED_PROPERTY,
                types::KEYFRAME_DOUBLE,
                types::KEYED_PROPERTY,
                types::KEYFRAME_DOUBLE,
                types::KEYED_OBJECT,
                types::KEYED_PROPERTY,
                types::KEYFRAME_COLOR,
            ]
        );
        assert_eq!(built.report.unresolved_links, 1);
        let color_frame = find(&built, types::KEYFRAME_COLOR);
        assert_eq!(color_frame.get(keys::KEYFRAME_COLOR_VALUE), Some(&Value::Color(0xFFFF_FFFF)));
        assert_eq!(color_frame.get(keys::KEYFRAME_INTERPOLATION_TYPE), Some(&Value::Uint(0)));
        assert_eq!(
            find(&built, types::KEYED_OBJECT).get(keys::KEYED_OBJECT_ID),
            Some(&Value::Uint(1))
        );
    }

    #[test]
    fn test_state_machine_layout() {
        let built = build(
            r#"{"artboards": [{"animations": [{"name": "idle"}], "stateMachines": [{
                "name": "sm",
                "inputs": [{"type": "number", "name": "level", "value": 2}, {"type": "trigger", "name": "go"}],
                "layers": [{"states": [{"type": "entry"}, {"type": "animation", "animation": "idle"}, {"type": "exit"}],
                            "transitions": [{"from": 1, "to": 2, "duration": 100}, {"from": 0, "to": 1}]}]
            }]}]}"#,
        );
        assert_eq!(
            tags(&built)[2..].to_vec(),
            vec![
                types::STATE_MACHINE,
                types::STATE_MACHINE_NUMBER,
                types::STATE_MACHINE_TRIGGER,
                types::STATE_MACHINE_LAYER,
                types::ENTRY_STATE,
                types::STATE_TRANSITION,
                types::ANIMATION_STATE,
                types::STATE_TRANSITION,
                types::EXIT_STATE,
            ]
        );
        assert_eq!(
            find(&built, types::ANIMATION_STATE).get(keys::ANIMATION_STATE_ANIMATION_ID),
            Some(&Value::Uint(0))
        );
    }

    #[test]
    fn test_transition_out_of_range() {
        let scene = parse_scene(
            r#"{"artboards": [{"stateMachines": [{"layers": [{"states": [{"type": "entry"}],
                "transitions": [{"from": 0, "to": 3}]}]}]}]}"#,
        )
        .unwrap();
        assert!(matches!(build_scene(&scene), Err(SceneError::Shape { .. })));
    }

    #[test]
    fn test_json_document_detection() {
        let scene = parse_json_document(r#"{"artboards": []}"#).unwrap();
        assert!(matches!(scene, JsonDocument::Scene(_)));
        let records = parse_json_document(r#"{"objects": [{"type": 1, "id": 0}]}"#).unwrap();
        assert!(matches!(records, JsonDocument::Records(r) if r.len() == 1));
        assert!(matches!(parse_json_document("{"), Err(SceneError::Json(_))));
    }
}
