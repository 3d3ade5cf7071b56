//! Numeric layout parameters and their `#push` / `#pop` scoping.

use std::ops::{Index, IndexMut};

macro_rules! params {
    ($($variant:ident => $name:literal = $default:literal,)*) => {
        /// Every tunable length in the layout.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Param {
            $($variant,)*
        }

        impl Param {
            pub const ALL: &'static [Param] = &[$(Param::$variant,)*];

            /// Directive name without the `#` marker.
            pub fn name(self) -> &'static str {
                match self {
                    $(Param::$variant => $name,)*
                }
            }

            /// Unscaled default, in points.
            pub fn default_value(self) -> f64 {
                match self {
                    $(Param::$variant => $default,)*
                }
            }
        }
    };
}

params! {
    BarlinePadding => "barline_padding" = 8.0,
    BarlineSpacing => "barline_spacing" = 1.0,
    BarlineWidth => "barline_width" = 1.0,
    FinalBarlineWidth => "final_barline_width" = 2.0,
    RepeatRadius => "repeat_radius" = 1.0,
    RepeatDotOffset => "repeat_dot_offset" = 1.0,
    MarginTop => "margin_top" = 14.0,
    MarginRight => "margin_right" = 22.0,
    MarginBottom => "margin_bottom" = 22.0,
    MarginLeft => "margin_left" = 25.0,
    ChordSize => "chord_size" = 14.0,
    LabelSize => "label_size" = 12.0,
    RepeatNumSize => "repeat_num_size" = 10.0,
    TitleSize => "title_size" = 20.0,
    SubtitleSize => "subtitle_size" = 14.0,
    AuthorSize => "author_size" = 12.0,
    CopyrightSize => "copyright_size" = 8.0,
    KeySize => "key_size" = 18.0,
    KeyOffset => "key_offset" = 16.0,
    KeyPadding => "key_padding" = 2.0,
    KeyBoxWidth => "key_box_width" = 1.0,
    TempoSize => "tempo_size" = 12.0,
    TempoBreak => "tempo_break" = 12.0,
    FirstLineOffset => "first_offset" = 20.0,
    SystemOffset => "system_offset" = 14.0,
    LabelOffset => "label_offset" = 10.0,
    RepeatNumOffset => "repeat_num_offset" = 1.5,
    BreakSize => "break_size" = 10.0,
    StrokeWidth => "stroke_width" = 1.0,
    PushOffset => "push_offset" = -1.0,
    PushWidth => "push_width" = 7.0,
    PushHeight => "push_height" = 6.0,
    RingXOffset => "ring_x_offset" = 0.0,
    RingYOffset => "ring_y_offset" = 2.0,
    RingXMargin => "ring_x_margin" = 5.0,
    RingYMargin => "ring_y_margin" = 4.0,
    ChokeOffset => "choke_offset" = 4.0,
    ChokeWidth => "choke_width" = 8.0,
    ChokeHeight => "choke_height" = 6.0,
    PauseYOffset => "pause_y_offset" = 0.0,
    PauseLineRadius => "pause_line_radius" = 4.0,
    PauseDotRadius => "pause_dot_radius" = 1.0,
}

impl Param {
    pub const COUNT: usize = Param::ALL.len();

    pub fn from_name(name: &str) -> Option<Param> {
        Param::ALL.iter().copied().find(|p| p.name() == name)
    }
}

/// One frame of parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    values: [f64; Param::COUNT],
}

impl ParameterSet {
    /// Defaults multiplied by `scale`.
    pub fn scaled_defaults(scale: f64) -> Self {
        let mut values = [0.0; Param::COUNT];
        for &p in Param::ALL {
            values[p as usize] = p.default_value() * scale;
        }
        Self { values }
    }
}

impl Index<Param> for ParameterSet {
    type Output = f64;

    fn index(&self, p: Param) -> &f64 {
        &self.values[p as usize]
    }
}

impl IndexMut<Param> for ParameterSet {
    fn index_mut(&mut self, p: Param) -> &mut f64 {
        &mut self.values[p as usize]
    }
}

/// Stack of parameter frames. Only the top frame is read or written, and
/// the stack never drops below one frame.
#[derive(Debug, Clone)]
pub struct ParamStack {
    base: ParameterSet,
    scoped: Vec<ParameterSet>,
}

impl ParamStack {
    pub fn new(scale: f64) -> Self {
        Self {
            base: ParameterSet::scaled_defaults(scale),
            scoped: Vec::new(),
        }
    }

    pub fn depth(&self) -> usize {
        1 + self.scoped.len()
    }

    pub fn top(&self) -> &ParameterSet {
        self.scoped.last().unwrap_or(&self.base)
    }

    fn top_mut(&mut self) -> &mut ParameterSet {
        self.scoped.last_mut().unwrap_or(&mut self.base)
    }

    /// Duplicate the top frame.
    pub fn push(&mut self) {
        let copy = self.top().clone();
        self.scoped.push(copy);
    }

    /// Discard the top frame. Returns `None`, leaving the stack untouched,
    /// when only the base frame is left.
    pub fn pop(&mut self) -> Option<ParameterSet> {
        self.scoped.pop()
    }

    pub fn get(&self, p: Param) -> f64 {
        self.top()[p]
    }

    pub fn set(&mut self, p: Param, value: f64) {
        self.top_mut()[p] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_scaled() {
        let stack = ParamStack::new(2.0);
        assert_eq!(stack.get(Param::ChordSize), 28.0);
        assert_eq!(stack.get(Param::PushOffset), -2.0);
        assert_eq!(stack.get(Param::RepeatNumOffset), 3.0);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn push_then_pop_restores_every_parameter() {
        let mut stack = ParamStack::new(1.0);
        stack.set(Param::MarginLeft, 40.0);
        let before = stack.top().clone();

        stack.push();
        for (i, &p) in Param::ALL.iter().enumerate() {
            stack.set(p, 1000.0 + i as f64);
        }
        assert_eq!(stack.get(Param::MarginLeft), 1000.0 + Param::MarginLeft as usize as f64);
        assert!(stack.pop().is_some());

        assert_eq!(stack.top(), &before);
    }

    #[test]
    fn push_pop_without_mutation_is_identity() {
        let mut stack = ParamStack::new(1.5);
        let before = stack.top().clone();
        stack.push();
        stack.push();
        stack.pop();
        stack.pop();
        assert_eq!(stack.top(), &before);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn pop_on_base_frame_fails() {
        let mut stack = ParamStack::new(1.0);
        assert!(stack.pop().is_none());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.get(Param::ChordSize), 14.0);
    }

    #[test]
    fn names_round_trip_and_are_unique() {
        assert_eq!(Param::COUNT, 42);
        for &p in Param::ALL {
            assert_eq!(Param::from_name(p.name()), Some(p));
        }
        assert_eq!(Param::from_name("first_offset"), Some(Param::FirstLineOffset));
        assert_eq!(Param::from_name("title"), None);
    }
}
