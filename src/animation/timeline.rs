use std::collections::BTreeMap;
use std::time::Duration;

use super::Ease;

/// Page elements that take part in animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    Logo,
    Eyebrow,
    Heading,
    Description,
    Form,
    CommandAccent,
    RecordAccent,
    SuccessBanner,
}

impl Element {
    /// Elements hidden until the entrance sequence reveals them
    pub const REVEALABLE: [Element; 7] = [
        Element::Logo,
        Element::Eyebrow,
        Element::Heading,
        Element::Description,
        Element::Form,
        Element::CommandAccent,
        Element::RecordAccent,
    ];
    /// Text and form blocks that slide up into place
    pub const CONTENT: [Element; 4] = [
        Element::Eyebrow,
        Element::Heading,
        Element::Description,
        Element::Form,
    ];
    /// Decorative glowing buttons
    pub const ACCENTS: [Element; 2] = [Element::CommandAccent, Element::RecordAccent];

    /// The DOM id of the element in the landing page
    pub fn dom_id(&self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Eyebrow => "eyebrow",
            Self::Heading => "heading",
            Self::Description => "description",
            Self::Form => "waitlist-form",
            Self::CommandAccent => "command-accent",
            Self::RecordAccent => "record-accent",
            Self::SuccessBanner => "success-banner",
        }
    }
}

/// Animatable numeric properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Opacity,
    /// Vertical offset in pixels
    Y,
    Scale,
    /// Rotation in degrees
    Rotation,
    /// Glow intensity in `[0, 1]`
    Glow,
}

/// Rendered state of one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementState {
    pub visible: bool,
    pub opacity: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
    pub glow: f64,
}

impl ElementState {
    /// State of an element at rest, as laid out by the page
    pub const REST: ElementState = ElementState {
        visible: true,
        opacity: 1.0,
        y: 0.0,
        scale: 1.0,
        rotation: 0.0,
        glow: 0.0,
    };
    /// State before any animation has run
    pub const HIDDEN: ElementState = ElementState {
        visible: false,
        opacity: 0.0,
        ..Self::REST
    };

    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::Opacity => self.opacity,
            Property::Y => self.y,
            Property::Scale => self.scale,
            Property::Rotation => self.rotation,
            Property::Glow => self.glow,
        }
    }

    pub fn set(&mut self, property: Property, value: f64) {
        let slot = match property {
            Property::Opacity => &mut self.opacity,
            Property::Y => &mut self.y,
            Property::Scale => &mut self.scale,
            Property::Rotation => &mut self.rotation,
            Property::Glow => &mut self.glow,
        };
        *slot = value;
    }
}

/// A partial set of property values, used both for instant sets and tween targets
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Props {
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub glow: Option<f64>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }
    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }
    pub fn y(mut self, value: f64) -> Self {
        self.y = Some(value);
        self
    }
    pub fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }
    pub fn rotation(mut self, value: f64) -> Self {
        self.rotation = Some(value);
        self
    }
    pub fn glow(mut self, value: f64) -> Self {
        self.glow = Some(value);
        self
    }

    /// The numeric properties this set touches
    pub fn values(&self) -> impl Iterator<Item = (Property, f64)> {
        [
            (Property::Opacity, self.opacity),
            (Property::Y, self.y),
            (Property::Scale, self.scale),
            (Property::Rotation, self.rotation),
            (Property::Glow, self.glow),
        ]
        .into_iter()
        .filter_map(|(property, value)| value.map(|v| (property, v)))
    }

    pub fn touches(&self, property: Property) -> bool {
        self.values().any(|(p, _)| p == property)
    }

    fn apply(&self, state: &mut ElementState) {
        if let Some(visible) = self.visible {
            state.visible = visible;
        }
        for (property, value) in self.values() {
            state.set(property, value);
        }
    }
}

/// How often a tween plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    /// Loop for as long as the timeline runs, reversing every other cycle when `yoyo` is set
    Forever { yoyo: bool },
}

/// A scheduled transition of one element towards target values
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub element: Element,
    /// Offset from the timeline start
    pub start: Duration,
    /// Length of a single cycle
    pub duration: Duration,
    pub ease: Ease,
    /// Visibility is not tweened, only the numeric targets are used
    pub to: Props,
    pub repeat: Repeat,
    /// Value of each targeted property at the tween's start offset
    from: Vec<(Property, f64)>,
}

impl Tween {
    /// Offset at which the tween stops changing, `None` if it never does
    pub fn end(&self) -> Option<Duration> {
        match self.repeat {
            Repeat::Once => Some(self.start + self.duration),
            Repeat::Forever { .. } => None,
        }
    }

    /// Linear progress through the current cycle, `None` before the tween starts
    pub fn cycle_progress(&self, elapsed: Duration) -> Option<f64> {
        let local = elapsed.checked_sub(self.start)?;
        if self.duration.is_zero() {
            return Some(1.0);
        }
        let cycles = local.as_secs_f64() / self.duration.as_secs_f64();

        let progress = match self.repeat {
            Repeat::Once => cycles.min(1.0),
            Repeat::Forever { yoyo } => {
                let completed = cycles.floor();
                let fraction = cycles - completed;
                if yoyo && completed as u64 % 2 == 1 {
                    1.0 - fraction
                } else {
                    fraction
                }
            }
        };
        Some(progress)
    }

    /// Eased progress at `elapsed`, `None` before the tween starts
    pub fn progress(&self, elapsed: Duration) -> Option<f64> {
        self.cycle_progress(elapsed).map(|p| self.ease.apply(p))
    }

    fn start_value(&self, property: Property) -> Option<f64> {
        self.from.iter().find(|(p, _)| *p == property).map(|(_, v)| *v)
    }
}

/// Offsets are kept at millisecond precision so staggered sums stay exact
fn millis(secs: f64) -> Duration {
    Duration::from_millis((secs.max(0.0) * 1000.0).round() as u64)
}

/// Sampled state of every element of a timeline at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct Scene(BTreeMap<Element, ElementState>);

impl Scene {
    pub fn get(&self, element: Element) -> Option<&ElementState> {
        self.0.get(&element)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, &ElementState)> {
        self.0.iter().map(|(element, state)| (*element, state))
    }
}

/// An ordered set of instant property sets and tweens over a fixed group of elements
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pre_mount: BTreeMap<Element, ElementState>,
    mounted: BTreeMap<Element, ElementState>,
    tweens: Vec<Tween>,
}

impl Timeline {
    /// A timeline over `elements`, all of which start hidden
    pub fn new(elements: &[Element]) -> Self {
        let pre_mount: BTreeMap<_, _> = elements
            .iter()
            .map(|element| (*element, ElementState::HIDDEN))
            .collect();
        Self {
            mounted: pre_mount.clone(),
            pre_mount,
            tweens: Vec::new(),
        }
    }

    /// Apply `props` to `elements` instantly when the timeline mounts
    pub fn set(mut self, elements: &[Element], props: Props) -> Self {
        for element in elements {
            self.pre_mount.entry(*element).or_insert(ElementState::HIDDEN);
            let state = self.mounted.entry(*element).or_insert(ElementState::HIDDEN);
            props.apply(state);
        }
        // Mounted values feed every tween's start
        for index in 0..self.tweens.len() {
            self.tweens[index].from = self.start_values(index);
        }
        self
    }

    /// Tween `element` towards `props`, starting `at` seconds into the timeline
    pub fn to(self, element: Element, at: f64, duration: f64, ease: Ease, props: Props) -> Self {
        self.tween(element, at, duration, ease, props, Repeat::Once)
    }

    /// Tween each of `elements` towards `props`, offsetting each start by `stagger` seconds
    pub fn to_staggered(
        mut self,
        elements: &[Element],
        at: f64,
        stagger: f64,
        duration: f64,
        ease: Ease,
        props: Props,
    ) -> Self {
        for (i, element) in elements.iter().enumerate() {
            self = self.to(*element, at + stagger * i as f64, duration, ease, props);
        }
        self
    }

    /// Loop a tween on each of `elements` indefinitely, starting `at` seconds into the timeline
    pub fn forever(
        mut self,
        elements: &[Element],
        at: f64,
        duration: f64,
        ease: Ease,
        yoyo: bool,
        props: Props,
    ) -> Self {
        for element in elements {
            self = self.tween(*element, at, duration, ease, props, Repeat::Forever { yoyo });
        }
        self
    }

    fn tween(
        mut self,
        element: Element,
        at: f64,
        duration: f64,
        ease: Ease,
        props: Props,
        repeat: Repeat,
    ) -> Self {
        self.pre_mount.entry(element).or_insert(ElementState::HIDDEN);
        self.mounted.entry(element).or_insert(ElementState::HIDDEN);
        self.tweens.push(Tween {
            element,
            start: millis(at),
            duration: millis(duration),
            ease,
            to: props,
            repeat,
            from: Vec::new(),
        });
        let index = self.tweens.len() - 1;
        self.tweens[index].from = self.start_values(index);
        self
    }

    /// Starting values of tween `index`, from the tweens before it
    fn start_values(&self, index: usize) -> Vec<(Property, f64)> {
        let tween = &self.tweens[index];
        tween
            .to
            .values()
            .map(|(property, _)| {
                let value = self.value_at(tween.element, property, tween.start, index);
                (property, value)
            })
            .collect()
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// End of the last one-shot tween. Endless loops are not counted.
    pub fn duration(&self) -> Duration {
        self.tweens
            .iter()
            .filter_map(Tween::end)
            .max()
            .unwrap_or_default()
    }

    /// Whether any tween keeps running indefinitely
    pub fn is_infinite(&self) -> bool {
        self.tweens.iter().any(|tween| tween.end().is_none())
    }

    /// Every element as it is before mounting, and after a revert
    pub fn pre_mount(&self) -> Scene {
        Scene(self.pre_mount.clone())
    }

    /// Sample every element at `elapsed` since mount
    pub fn sample(&self, elapsed: Duration) -> Scene {
        let mut scene = self.mounted.clone();
        for (element, state) in scene.iter_mut() {
            for property in [
                Property::Opacity,
                Property::Y,
                Property::Scale,
                Property::Rotation,
                Property::Glow,
            ] {
                let value = self.value_at(*element, property, elapsed, self.tweens.len());
                state.set(property, value);
            }
        }
        Scene(scene)
    }

    /// Value of one property at `elapsed`, considering only the first `upto` tweens.
    ///
    /// A tween starts from whatever value the tweens before it left at its start offset, cached
    /// when the tween is added. Where tweens on the same property overlap, the later one wins.
    fn value_at(&self, element: Element, property: Property, elapsed: Duration, upto: usize) -> f64 {
        let mut value = self
            .mounted
            .get(&element)
            .map(|state| state.get(property))
            .unwrap_or_else(|| ElementState::HIDDEN.get(property));

        for tween in &self.tweens[..upto] {
            if tween.element != element {
                continue;
            }
            let Some(target) = tween.to.values().find(|(p, _)| *p == property).map(|(_, v)| v)
            else {
                continue;
            };
            let (Some(progress), Some(from)) = (tween.progress(elapsed), tween.start_value(property)) else {
                continue;
            };
            value = from + (target - from) * progress;
        }
        value
    }
}
