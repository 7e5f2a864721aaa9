//! Property keys and their wire kinds.

use super::{PropertyDef, WireKind};

// Linkage (written as the first pairs of a linked object record)
pub const OBJECT_ID: u16 = 3;
pub const PARENT_ID: u16 = 5;

// Component
pub const NAME: u16 = 4;

// Artboard
pub const ARTBOARD_WIDTH: u16 = 7;
pub const ARTBOARD_HEIGHT: u16 = 8;
pub const ARTBOARD_X: u16 = 9;
pub const ARTBOARD_Y: u16 = 10;
pub const ARTBOARD_ORIGIN_X: u16 = 11;
pub const ARTBOARD_ORIGIN_Y: u16 = 12;

// Node transform
pub const NODE_X: u16 = 13;
pub const NODE_Y: u16 = 14;
pub const ROTATION: u16 = 15;
pub const SCALE_X: u16 = 16;
pub const SCALE_Y: u16 = 17;
pub const OPACITY: u16 = 18;

// Parametric paths
pub const PATH_WIDTH: u16 = 20;
pub const PATH_HEIGHT: u16 = 21;
pub const BLEND_MODE: u16 = 23;

// Vertices
pub const VERTEX_X: u16 = 24;
pub const VERTEX_Y: u16 = 25;
pub const VERTEX_RADIUS: u16 = 26;
pub const CORNER_RADIUS: u16 = 31;
pub const IS_CLOSED: u16 = 32;

// Gradients
pub const GRADIENT_START_Y: u16 = 33;
pub const GRADIENT_END_X: u16 = 34;
pub const GRADIENT_END_Y: u16 = 35;
pub const SOLID_COLOR_VALUE: u16 = 37;
pub const GRADIENT_STOP_COLOR: u16 = 38;
pub const GRADIENT_STOP_POSITION: u16 = 39;
pub const FILL_RULE: u16 = 40;
pub const PAINT_IS_VISIBLE: u16 = 41;
pub const GRADIENT_START_X: u16 = 42;
pub const GRADIENT_OPACITY: u16 = 46;

// Stroke
pub const STROKE_THICKNESS: u16 = 47;
pub const STROKE_CAP: u16 = 48;
pub const STROKE_JOIN: u16 = 49;
pub const STROKE_TRANSFORM_AFFECTS: u16 = 50;

// Animation
pub const KEYED_OBJECT_ID: u16 = 51;
pub const KEYED_PROPERTY_KEY: u16 = 53;
pub const ANIMATION_NAME: u16 = 55;
pub const ANIMATION_FPS: u16 = 56;
pub const ANIMATION_DURATION: u16 = 57;
pub const ANIMATION_SPEED: u16 = 58;
pub const ANIMATION_LOOP: u16 = 59;
pub const ANIMATION_WORK_START: u16 = 60;
pub const ANIMATION_WORK_END: u16 = 61;
pub const ANIMATION_ENABLE_WORK_AREA: u16 = 62;
pub const INTERPOLATOR_X1: u16 = 63;
pub const INTERPOLATOR_Y1: u16 = 64;
pub const INTERPOLATOR_X2: u16 = 65;
pub const INTERPOLATOR_Y2: u16 = 66;
pub const KEYFRAME_FRAME: u16 = 67;
pub const KEYFRAME_INTERPOLATION_TYPE: u16 = 68;
pub const KEYFRAME_INTERPOLATOR_ID: u16 = 69;
pub const KEYFRAME_DOUBLE_VALUE: u16 = 70;

// Cubic vertex handles
pub const IN_ROTATION: u16 = 84;
pub const IN_DISTANCE: u16 = 85;
pub const OUT_ROTATION: u16 = 86;
pub const OUT_DISTANCE: u16 = 87;
pub const KEYFRAME_COLOR_VALUE: u16 = 88;

// Clipping
pub const CLIPPING_SOURCE_ID: u16 = 92;
pub const CLIPPING_FILL_RULE: u16 = 93;
pub const CLIPPING_IS_VISIBLE: u16 = 94;

// Trim path
pub const TRIM_START: u16 = 114;
pub const TRIM_END: u16 = 115;
pub const TRIM_OFFSET: u16 = 116;
pub const TRIM_MODE: u16 = 117;

// Polygon / star
pub const POLYGON_POINTS: u16 = 125;
pub const POLYGON_CORNER_RADIUS: u16 = 126;
pub const STAR_INNER_RADIUS: u16 = 127;

// State machines
pub const STATE_MACHINE_NAME: u16 = 138;
pub const STATE_MACHINE_NUMBER_VALUE: u16 = 140;
pub const STATE_MACHINE_BOOL_VALUE: u16 = 141;
pub const ANIMATION_STATE_ANIMATION_ID: u16 = 149;
pub const TRANSITION_STATE_TO_ID: u16 = 151;
pub const TRANSITION_FLAGS: u16 = 152;
pub const TRANSITION_DURATION: u16 = 158;

// Feather
pub const FEATHER_STRENGTH: u16 = 749;
pub const FEATHER_OFFSET_X: u16 = 750;
pub const FEATHER_OFFSET_Y: u16 = 751;
pub const FEATHER_INNER: u16 = 752;

/// Keys whose value is a reference to another object's local id.
pub const REFERENCE_KEYS: &[u16] = &[KEYED_OBJECT_ID, CLIPPING_SOURCE_ID];

const fn def(key: u16, name: &'static str, kind: WireKind) -> PropertyDef {
    PropertyDef { key, name, kind }
}

pub(crate) static PROPERTY_DEFS: &[PropertyDef] = &[
    def(OBJECT_ID, "id", WireKind::Uint),
    def(NAME, "name", WireKind::String),
    def(PARENT_ID, "parentId", WireKind::Uint),
    def(ARTBOARD_WIDTH, "width", WireKind::Float),
    def(ARTBOARD_HEIGHT, "height", WireKind::Float),
    def(ARTBOARD_X, "x", WireKind::Float),
    def(ARTBOARD_Y, "y", WireKind::Float),
    def(ARTBOARD_ORIGIN_X, "originX", WireKind::Float),
    def(ARTBOARD_ORIGIN_Y, "originY", WireKind::Float),
    def(NODE_X, "x", WireKind::Float),
    def(NODE_Y, "y", WireKind::Float),
    def(ROTATION, "rotation", WireKind::Float),
    def(SCALE_X, "scaleX", WireKind::Float),
    def(SCALE_Y, "scaleY", WireKind::Float),
    def(OPACITY, "opacity", WireKind::Float),
    def(PATH_WIDTH, "width", WireKind::Float),
    def(PATH_HEIGHT, "height", WireKind::Float),
    def(BLEND_MODE, "blendMode", WireKind::Uint),
    def(VERTEX_X, "x", WireKind::Float),
    def(VERTEX_Y, "y", WireKind::Float),
    def(VERTEX_RADIUS, "radius", WireKind::Float),
    def(CORNER_RADIUS, "cornerRadius", WireKind::Float),
    def(IS_CLOSED, "isClosed", WireKind::Bool),
    def(GRADIENT_START_Y, "startY", WireKind::Float),
    def(GRADIENT_END_X, "endX", WireKind::Float),
    def(GRADIENT_END_Y, "endY", WireKind::Float),
    def(SOLID_COLOR_VALUE, "color", WireKind::Color),
    def(GRADIENT_STOP_COLOR, "color", WireKind::Color),
    def(GRADIENT_STOP_POSITION, "position", WireKind::Float),
    def(FILL_RULE, "fillRule", WireKind::Uint),
    def(PAINT_IS_VISIBLE, "isVisible", WireKind::Bool),
    def(GRADIENT_START_X, "startX", WireKind::Float),
    def(GRADIENT_OPACITY, "opacity", WireKind::Float),
    def(STROKE_THICKNESS, "thickness", WireKind::Float),
    def(STROKE_CAP, "cap", WireKind::Uint),
    def(STROKE_JOIN, "join", WireKind::Uint),
    def(STROKE_TRANSFORM_AFFECTS, "transformAffectsStroke", WireKind::Bool),
    def(KEYED_OBJECT_ID, "objectId", WireKind::Uint),
    def(KEYED_PROPERTY_KEY, "propertyKey", WireKind::Uint),
    def(ANIMATION_NAME, "name", WireKind::String),
    def(ANIMATION_FPS, "fps", WireKind::Uint),
    def(ANIMATION_DURATION, "duration", WireKind::Uint),
    def(ANIMATION_SPEED, "speed", WireKind::Float),
    def(ANIMATION_LOOP, "loop", WireKind::Uint),
    def(ANIMATION_WORK_START, "workStart", WireKind::Uint),
    def(ANIMATION_WORK_END, "workEnd", WireKind::Uint),
    def(ANIMATION_ENABLE_WORK_AREA, "enableWorkArea", WireKind::Bool),
    def(INTERPOLATOR_X1, "x1", WireKind::Float),
    def(INTERPOLATOR_Y1, "y1", WireKind::Float),
    def(INTERPOLATOR_X2, "x2", WireKind::Float),
    def(INTERPOLATOR_Y2, "y2", WireKind::Float),
    def(KEYFRAME_FRAME, "frame", WireKind::Uint),
    def(KEYFRAME_INTERPOLATION_TYPE, "interpolationType", WireKind::Uint),
    def(KEYFRAME_INTERPOLATOR_ID, "interpolatorId", WireKind::Uint),
    def(KEYFRAME_DOUBLE_VALUE, "value", WireKind::Float),
    def(IN_ROTATION, "inRotation", WireKind::Float),
    def(IN_DISTANCE, "inDistance", WireKind::Float),
    def(OUT_ROTATION, "outRotation", WireKind::Float),
    def(OUT_DISTANCE, "outDistance", WireKind::Float),
    def(KEYFRAME_COLOR_VALUE, "value", WireKind::Color),
    def(CLIPPING_SOURCE_ID, "sourceId", WireKind::Uint),
    def(CLIPPING_FILL_RULE, "fillRule", WireKind::Uint),
    def(CLIPPING_IS_VISIBLE, "isVisible", WireKind::Bool),
    def(TRIM_START, "start", WireKind::Float),
    def(TRIM_END, "end", WireKind::Float),
    def(TRIM_OFFSET, "offset", WireKind::Float),
    def(TRIM_MODE, "mode", WireKind::Uint),
    def(POLYGON_POINTS, "points", WireKind::Uint),
    def(POLYGON_CORNER_RADIUS, "cornerRadius", WireKind::Float),
    def(STAR_INNER_RADIUS, "innerRadius", WireKind::Float),
    def(STATE_MACHINE_NAME, "name", WireKind::String),
    def(STATE_MACHINE_NUMBER_VALUE, "value", WireKind::Float),
    def(STATE_MACHINE_BOOL_VALUE, "value", WireKind::Bool),
    def(ANIMATION_STATE_ANIMATION_ID, "animationId", WireKind::Uint),
    def(TRANSITION_STATE_TO_ID, "stateToId", WireKind::Uint),
    def(TRANSITION_FLAGS, "flags", WireKind::Uint),
    def(TRANSITION_DURATION, "duration", WireKind::Uint),
    def(FEATHER_STRENGTH, "strength", WireKind::Float),
    def(FEATHER_OFFSET_X, "offsetX", WireKind::Float),
    def(FEATHER_OFFSET_Y, "offsetY", WireKind::Float),
    def(FEATHER_INNER, "inner", WireKind::Bool),
];
