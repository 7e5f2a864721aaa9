//! Type tags and their roles in the object graph.

use super::keys::*;
use super::{TypeDef, TypeRole};

pub const ARTBOARD: u16 = 1;
pub const NODE: u16 = 2;
pub const SHAPE: u16 = 3;
pub const ELLIPSE: u16 = 4;
pub const STRAIGHT_VERTEX: u16 = 5;
pub const CUBIC_DETACHED_VERTEX: u16 = 6;
pub const RECTANGLE: u16 = 7;
pub const TRIANGLE: u16 = 8;
pub const POINTS_PATH: u16 = 16;
pub const RADIAL_GRADIENT: u16 = 17;
pub const SOLID_COLOR: u16 = 18;
pub const GRADIENT_STOP: u16 = 19;
pub const FILL: u16 = 20;
pub const LINEAR_GRADIENT: u16 = 22;
pub const BACKBOARD: u16 = 23;
pub const STROKE: u16 = 24;
pub const KEYED_OBJECT: u16 = 25;
pub const KEYED_PROPERTY: u16 = 26;
pub const CUBIC_EASE_INTERPOLATOR: u16 = 28;
pub const KEYFRAME_DOUBLE: u16 = 30;
pub const LINEAR_ANIMATION: u16 = 31;
pub const KEYFRAME_COLOR: u16 = 37;
pub const CLIPPING_SHAPE: u16 = 42;
pub const TRIM_PATH: u16 = 47;
pub const POLYGON: u16 = 51;
pub const STAR: u16 = 52;
pub const STATE_MACHINE: u16 = 53;
pub const STATE_MACHINE_NUMBER: u16 = 56;
pub const STATE_MACHINE_LAYER: u16 = 57;
pub const STATE_MACHINE_TRIGGER: u16 = 58;
pub const STATE_MACHINE_BOOL: u16 = 59;
pub const ANIMATION_STATE: u16 = 61;
pub const ANY_STATE: u16 = 62;
pub const ENTRY_STATE: u16 = 63;
pub const EXIT_STATE: u16 = 64;
pub const STATE_TRANSITION: u16 = 65;
pub const FEATHER: u16 = 533;

const NODE_PROPS: &[u16] = &[NAME, NODE_X, NODE_Y, ROTATION, SCALE_X, SCALE_Y, OPACITY];
const SHAPE_PROPS: &[u16] = &[NAME, NODE_X, NODE_Y, ROTATION, SCALE_X, SCALE_Y, OPACITY, BLEND_MODE];
const PARAMETRIC_PROPS: &[u16] = &[
    NAME, NODE_X, NODE_Y, ROTATION, SCALE_X, SCALE_Y, OPACITY, PATH_WIDTH, PATH_HEIGHT,
];
const RECTANGLE_PROPS: &[u16] = &[
    NAME, NODE_X, NODE_Y, ROTATION, SCALE_X, SCALE_Y, OPACITY, PATH_WIDTH, PATH_HEIGHT,
    CORNER_RADIUS,
];
const POLYGON_PROPS: &[u16] = &[
    NAME, NODE_X, NODE_Y, ROTATION, SCALE_X, SCALE_Y, OPACITY, PATH_WIDTH, PATH_HEIGHT,
    POLYGON_POINTS, POLYGON_CORNER_RADIUS,
];
const STAR_PROPS: &[u16] = &[
    NAME, NODE_X, NODE_Y, ROTATION, SCALE_X, SCALE_Y, OPACITY, PATH_WIDTH, PATH_HEIGHT,
    POLYGON_POINTS, POLYGON_CORNER_RADIUS, STAR_INNER_RADIUS,
];
const POINTS_PATH_PROPS: &[u16] = &[
    NAME, NODE_X, NODE_Y, ROTATION, SCALE_X, SCALE_Y, OPACITY, IS_CLOSED,
];
const GRADIENT_PROPS: &[u16] = &[
    NAME, GRADIENT_START_X, GRADIENT_START_Y, GRADIENT_END_X, GRADIENT_END_Y, GRADIENT_OPACITY,
];
const KEYFRAME_DOUBLE_PROPS: &[u16] = &[
    KEYFRAME_FRAME, KEYFRAME_INTERPOLATION_TYPE, KEYFRAME_INTERPOLATOR_ID, KEYFRAME_DOUBLE_VALUE,
];
const KEYFRAME_COLOR_PROPS: &[u16] = &[
    KEYFRAME_FRAME, KEYFRAME_INTERPOLATION_TYPE, KEYFRAME_INTERPOLATOR_ID, KEYFRAME_COLOR_VALUE,
];

const fn def(
    tag: u16,
    name: &'static str,
    scene_name: &'static str,
    role: TypeRole,
    properties: &'static [u16],
) -> TypeDef {
    TypeDef { tag, name, scene_name, role, properties }
}

pub(crate) static TYPE_DEFS: &[TypeDef] = &[
    def(
        ARTBOARD,
        "Artboard",
        "artboard",
        TypeRole::Root,
        &[
            NAME, ARTBOARD_WIDTH, ARTBOARD_HEIGHT, ARTBOARD_X, ARTBOARD_Y, ARTBOARD_ORIGIN_X,
            ARTBOARD_ORIGIN_Y,
        ],
    ),
    def(NODE, "Node", "node", TypeRole::Container, NODE_PROPS),
    def(SHAPE, "Shape", "shape", TypeRole::ShapeContainer, SHAPE_PROPS),
    def(ELLIPSE, "Ellipse", "ellipse", TypeRole::Path, PARAMETRIC_PROPS),
    def(
        STRAIGHT_VERTEX,
        "StraightVertex",
        "vertex",
        TypeRole::Vertex,
        &[NAME, VERTEX_X, VERTEX_Y, VERTEX_RADIUS],
    ),
    def(
        CUBIC_DETACHED_VERTEX,
        "CubicDetachedVertex",
        "cubic_vertex",
        TypeRole::Vertex,
        &[NAME, VERTEX_X, VERTEX_Y, IN_ROTATION, IN_DISTANCE, OUT_ROTATION, OUT_DISTANCE],
    ),
    def(RECTANGLE, "Rectangle", "rectangle", TypeRole::Path, RECTANGLE_PROPS),
    def(TRIANGLE, "Triangle", "triangle", TypeRole::Path, PARAMETRIC_PROPS),
    def(POINTS_PATH, "PointsPath", "path", TypeRole::Path, POINTS_PATH_PROPS),
    def(RADIAL_GRADIENT, "RadialGradient", "radial_gradient", TypeRole::PaintSource, GRADIENT_PROPS),
    def(SOLID_COLOR, "SolidColor", "solid_color", TypeRole::PaintSource, &[NAME, SOLID_COLOR_VALUE]),
    def(
        GRADIENT_STOP,
        "GradientStop",
        "gradient_stop",
        TypeRole::GradientStop,
        &[NAME, GRADIENT_STOP_COLOR, GRADIENT_STOP_POSITION],
    ),
    def(FILL, "Fill", "fill", TypeRole::Paint, &[NAME, PAINT_IS_VISIBLE, FILL_RULE]),
    def(LINEAR_GRADIENT, "LinearGradient", "linear_gradient", TypeRole::PaintSource, GRADIENT_PROPS),
    def(BACKBOARD, "Backboard", "backboard", TypeRole::Metadata, &[]),
    def(
        STROKE,
        "Stroke",
        "stroke",
        TypeRole::Paint,
        &[
            NAME, PAINT_IS_VISIBLE, STROKE_THICKNESS, STROKE_CAP, STROKE_JOIN,
            STROKE_TRANSFORM_AFFECTS,
        ],
    ),
    def(KEYED_OBJECT, "KeyedObject", "keyed_object", TypeRole::Animation, &[KEYED_OBJECT_ID]),
    def(KEYED_PROPERTY, "KeyedProperty", "keyed_property", TypeRole::Animation, &[KEYED_PROPERTY_KEY]),
    def(
        CUBIC_EASE_INTERPOLATOR,
        "CubicEaseInterpolator",
        "cubic_interpolator",
        TypeRole::Animation,
        &[INTERPOLATOR_X1, INTERPOLATOR_Y1, INTERPOLATOR_X2, INTERPOLATOR_Y2],
    ),
    def(KEYFRAME_DOUBLE, "KeyFrameDouble", "keyframe_double", TypeRole::Animation, KEYFRAME_DOUBLE_PROPS),
    def(
        LINEAR_ANIMATION,
        "LinearAnimation",
        "animation",
        TypeRole::Animation,
        &[
            ANIMATION_NAME, ANIMATION_FPS, ANIMATION_DURATION, ANIMATION_SPEED, ANIMATION_LOOP,
            ANIMATION_WORK_START, ANIMATION_WORK_END, ANIMATION_ENABLE_WORK_AREA,
        ],
    ),
    def(KEYFRAME_COLOR, "KeyFrameColor", "keyframe_color", TypeRole::Animation, KEYFRAME_COLOR_PROPS),
    def(
        CLIPPING_SHAPE,
        "ClippingShape",
        "clipping_shape",
        TypeRole::Modifier,
        &[NAME, CLIPPING_SOURCE_ID, CLIPPING_FILL_RULE, CLIPPING_IS_VISIBLE],
    ),
    def(
        TRIM_PATH,
        "TrimPath",
        "trim_path",
        TypeRole::Effect,
        &[NAME, TRIM_START, TRIM_END, TRIM_OFFSET, TRIM_MODE],
    ),
    def(POLYGON, "Polygon", "polygon", TypeRole::Path, POLYGON_PROPS),
    def(STAR, "Star", "star", TypeRole::Path, STAR_PROPS),
    def(STATE_MACHINE, "StateMachine", "state_machine", TypeRole::StateMachine, &[STATE_MACHINE_NAME]),
    def(
        STATE_MACHINE_NUMBER,
        "StateMachineNumber",
        "number_input",
        TypeRole::StateMachine,
        &[STATE_MACHINE_NAME, STATE_MACHINE_NUMBER_VALUE],
    ),
    def(
        STATE_MACHINE_LAYER,
        "StateMachineLayer",
        "layer",
        TypeRole::StateMachine,
        &[STATE_MACHINE_NAME],
    ),
    def(
        STATE_MACHINE_TRIGGER,
        "StateMachineTrigger",
        "trigger_input",
        TypeRole::StateMachine,
        &[STATE_MACHINE_NAME],
    ),
    def(
        STATE_MACHINE_BOOL,
        "StateMachineBool",
        "bool_input",
        TypeRole::StateMachine,
        &[STATE_MACHINE_NAME, STATE_MACHINE_BOOL_VALUE],
    ),
    def(
        ANIMATION_STATE,
        "AnimationState",
        "animation_state",
        TypeRole::StateMachine,
        &[ANIMATION_STATE_ANIMATION_ID],
    ),
    def(ANY_STATE, "AnyState", "any_state", TypeRole::StateMachine, &[]),
    def(ENTRY_STATE, "EntryState", "entry_state", TypeRole::StateMachine, &[]),
    def(EXIT_STATE, "ExitState", "exit_state", TypeRole::StateMachine, &[]),
    def(
        STATE_TRANSITION,
        "StateTransition",
        "transition",
        TypeRole::StateMachine,
        &[TRANSITION_STATE_TO_ID, TRANSITION_FLAGS, TRANSITION_DURATION],
    ),
    def(
        FEATHER,
        "Feather",
        "feather",
        TypeRole::Effect,
        &[FEATHER_STRENGTH, FEATHER_OFFSET_X, FEATHER_OFFSET_Y, FEATHER_INNER],
    ),
];
