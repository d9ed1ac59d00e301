//! Scoped animation context
//!
//! An [`AnimationContext`] owns every timeline bound for one page section.
//! Selectors are scoped to descendants of the section element, and the
//! pre-animation style and text of every touched element are recorded so
//! [`AnimationContext::revert`] can put the subtree back exactly as it was.
//!
//! Scroll and frame updates are no-ops while the scope is detached from the
//! visible tree.

use folio_core::{CoreError, ElementId, StyleProps, Viewport, VisualTree};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::scrub::{ScrubMode, Scrubber};
use crate::text::SplitText;
use crate::timeline::Timeline;
use crate::trigger::{Region, ScrollTrigger, ToggleAction, TriggerAction};

/// Index of a binding inside its context
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

/// A timeline together with whatever drives it
#[derive(Debug)]
struct Binding {
    label: String,
    timeline: Timeline,
    trigger: Option<ScrollTrigger>,
    scrubber: Option<Scrubber>,
    region: Option<Region>,
}

/// Pre-animation state of an element
#[derive(Debug, Clone)]
struct Snapshot {
    style: StyleProps,
    text: Option<String>,
}

/// Scroll-linked animation orchestrator for one scope
pub struct AnimationContext {
    name: String,
    scope: ElementId,
    bindings: Vec<Binding>,
    snapshots: FxHashMap<ElementId, Snapshot>,
    splits: Vec<SplitText>,
}

impl AnimationContext {
    pub fn new(name: impl Into<String>, scope: ElementId) -> Self {
        Self {
            name: name.into(),
            scope,
            bindings: Vec::new(),
            snapshots: FxHashMap::default(),
            splits: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> ElementId {
        self.scope
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Descendants of the scope carrying `class`
    pub fn select(&self, tree: &VisualTree, class: &str) -> Vec<ElementId> {
        tree.query(self.scope, class)
    }

    /// Descendants of `within` carrying `class`, if `within` lies in the scope
    pub fn select_in(&self, tree: &VisualTree, within: ElementId, class: &str) -> Vec<ElementId> {
        if !tree.is_within(self.scope, within) {
            return Vec::new();
        }
        tree.query(within, class)
    }

    /// First descendant of the scope carrying `class`
    pub fn select_first(&self, tree: &VisualTree, class: &str) -> Option<ElementId> {
        tree.query_first(self.scope, class)
    }

    fn snapshot(&mut self, tree: &VisualTree, id: ElementId) {
        if self.snapshots.contains_key(&id) {
            return;
        }
        if let Some(element) = tree.get(id) {
            self.snapshots.insert(
                id,
                Snapshot {
                    style: element.style().clone(),
                    text: element.text().map(str::to_string),
                },
            );
        }
    }

    /// Apply props immediately, remembering the previous state for revert
    pub fn set(&mut self, tree: &mut VisualTree, targets: &[ElementId], props: &StyleProps) {
        for target in targets {
            if !tree.is_within(self.scope, *target) {
                continue;
            }
            self.snapshot(tree, *target);
            tree.apply_style(*target, props);
        }
    }

    /// Split a paragraph into word elements, undone on revert
    pub fn split_words(
        &mut self,
        tree: &mut VisualTree,
        paragraph: ElementId,
        word_class: &str,
    ) -> Result<Vec<ElementId>, CoreError> {
        if !tree.is_within(self.scope, paragraph) {
            return Err(CoreError::UnknownElement(paragraph));
        }
        self.snapshot(tree, paragraph);
        let split = SplitText::words(tree, paragraph, word_class)?;
        let words = split.word_elements().to_vec();
        self.splits.push(split);
        Ok(words)
    }

    /// Bind a timeline, optionally driven by a scroll trigger.
    ///
    /// Tweens whose targets are all missing are skipped. Returns `None` when
    /// nothing is left to animate or the trigger element is missing.
    pub fn add(
        &mut self,
        tree: &mut VisualTree,
        label: &str,
        mut timeline: Timeline,
        trigger: Option<ScrollTrigger>,
    ) -> Option<BindingId> {
        if let Some(trigger) = &trigger {
            if !tree.contains(trigger.trigger) {
                debug!(context = %self.name, label, "trigger element missing, skipping");
                return None;
            }
        }
        if timeline.bind(tree) == 0 {
            debug!(context = %self.name, label, "no targets, skipping");
            return None;
        }

        let targets: Vec<ElementId> = timeline.targets().collect();
        for target in targets {
            self.snapshot(tree, target);
        }

        let scrubber = match trigger.as_ref().map(|t| t.action) {
            Some(TriggerAction::Scrub(mode)) => Some(Scrubber::new(mode, 0.0)),
            _ => None,
        };

        debug!(
            context = %self.name,
            label,
            tweens = timeline.len(),
            duration = timeline.duration(),
            "bound timeline"
        );
        self.bindings.push(Binding {
            label: label.to_string(),
            timeline,
            trigger,
            scrubber,
            region: None,
        });
        Some(BindingId(self.bindings.len() - 1))
    }

    /// Start time-driven playback of a binding
    pub fn play(&mut self, id: BindingId) {
        if let Some(binding) = self.bindings.get_mut(id.0) {
            binding.timeline.play();
        }
    }

    pub fn timeline(&self, id: BindingId) -> Option<&Timeline> {
        self.bindings.get(id.0).map(|b| &b.timeline)
    }

    /// Re-evaluate every trigger against the current scroll position
    pub fn on_scroll(&mut self, tree: &mut VisualTree, viewport: Viewport) {
        if !tree.is_visible(self.scope) {
            return;
        }

        for binding in &mut self.bindings {
            let Some(trigger) = &binding.trigger else {
                continue;
            };
            let Some(window) = trigger.window(tree, viewport.height) else {
                continue;
            };

            match trigger.action {
                TriggerAction::Scrub(mode) => {
                    let progress = window.progress(viewport.scroll_y);
                    let Some(scrubber) = binding.scrubber.as_mut() else {
                        continue;
                    };
                    // First evaluation renders the resting state without easing in.
                    let first = binding.region.is_none();
                    scrubber.set_target(progress);
                    if first {
                        scrubber.snap();
                    }
                    binding.region = Some(window.region(viewport.scroll_y));

                    if first || mode == ScrubMode::Immediate {
                        binding.timeline.set_progress(scrubber.value());
                        binding.timeline.render(tree);
                    }
                    trace!(label = %binding.label, progress, "scrub");
                }
                TriggerAction::Toggle(actions) => {
                    let region = window.region(viewport.scroll_y);
                    let previous = binding.region.unwrap_or(Region::Before);
                    binding.region = Some(region);
                    for action in actions.transition(previous, region) {
                        apply_toggle(&mut binding.timeline, action);
                        debug!(label = %binding.label, ?action, "toggle");
                    }
                    binding.timeline.render(tree);
                }
            }
        }
    }

    /// Advance time-driven timelines and smoothed scrubs by `dt_secs`
    pub fn on_frame(&mut self, tree: &mut VisualTree, dt_secs: f32) {
        if !tree.is_visible(self.scope) {
            return;
        }

        for binding in &mut self.bindings {
            match (&binding.trigger, binding.scrubber.as_mut()) {
                (Some(_), Some(scrubber)) => {
                    if scrubber.tick(dt_secs) {
                        binding.timeline.set_progress(scrubber.value());
                        binding.timeline.render(tree);
                    }
                }
                _ => {
                    if binding.timeline.tick(dt_secs) {
                        binding.timeline.render(tree);
                    }
                }
            }
        }
    }

    /// Undo every split and restore every touched element, then drop all bindings
    pub fn revert(&mut self, tree: &mut VisualTree) {
        for split in self.splits.drain(..).rev() {
            split.revert(tree);
        }
        for (id, snapshot) in self.snapshots.drain() {
            if !tree.contains(id) {
                continue;
            }
            tree.replace_style(id, snapshot.style);
            if tree.text(id) != snapshot.text.as_deref() {
                tree.set_text(id, snapshot.text);
            }
        }
        debug!(context = %self.name, bindings = self.bindings.len(), "reverted");
        self.bindings.clear();
    }
}

fn apply_toggle(timeline: &mut Timeline, action: ToggleAction) {
    match action {
        ToggleAction::Play => timeline.play(),
        ToggleAction::Pause => timeline.pause(),
        ToggleAction::Resume => timeline.resume(),
        ToggleAction::Reverse => timeline.reverse(),
        ToggleAction::Restart => timeline.restart(),
        ToggleAction::Reset => timeline.reset(),
        ToggleAction::Complete => timeline.complete(),
        ToggleAction::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::timeline::{Playback, Position};
    use crate::trigger::ToggleActions;
    use crate::tween::Tween;
    use folio_core::LayoutBox;

    const VIEW_H: f32 = 1000.0;

    fn viewport(scroll_y: f32) -> Viewport {
        Viewport {
            scroll_y,
            width: 800.0,
            height: VIEW_H,
        }
    }

    /// Spacer of one viewport, then a 1000px section with a 100px box
    fn page() -> (VisualTree, ElementId, ElementId) {
        let mut tree = VisualTree::new(800.0, VIEW_H);
        let root = tree.root();
        tree.append(root, "div", &["spacer"], LayoutBox::height(VIEW_H))
            .unwrap();
        let section = tree
            .append(root, "section", &["section"], LayoutBox::height(1000.0))
            .unwrap();
        let item = tree
            .append(section, "div", &["item"], LayoutBox::height(100.0))
            .unwrap();
        tree.compute_layout();
        (tree, section, item)
    }

    fn linear_fade(item: ElementId) -> Timeline {
        Timeline::new().with(
            Tween::from_to([item], StyleProps::opacity(0.0), StyleProps::opacity(1.0))
                .duration(1.0)
                .ease(Easing::Linear),
            Position::At(0.0),
        )
    }

    #[test]
    fn test_scrub_maps_scroll_to_value() {
        let (mut tree, section, item) = page();
        let mut ctx = AnimationContext::new("test", section);
        // "top bottom" -> 0, "top top" -> 1000
        let trigger = ScrollTrigger::parse(section, "top bottom", "top top").unwrap();
        ctx.add(&mut tree, "fade", linear_fade(item), Some(trigger))
            .unwrap();

        ctx.on_scroll(&mut tree, viewport(250.0));
        assert_eq!(tree.style(item).unwrap().opacity, Some(0.25));

        ctx.on_scroll(&mut tree, viewport(5000.0));
        assert_eq!(tree.style(item).unwrap().opacity, Some(1.0));

        ctx.on_scroll(&mut tree, viewport(250.0));
        assert_eq!(tree.style(item).unwrap().opacity, Some(0.25));
    }

    #[test]
    fn test_smoothed_scrub_settles_on_scroll_value() {
        let (mut tree, section, item) = page();
        let mut ctx = AnimationContext::new("test", section);
        let trigger = ScrollTrigger::parse(section, "top bottom", "top top")
            .unwrap()
            .scrub(1.0);
        ctx.add(&mut tree, "fade", linear_fade(item), Some(trigger))
            .unwrap();

        ctx.on_scroll(&mut tree, viewport(0.0));
        ctx.on_scroll(&mut tree, viewport(500.0));
        let lagging = tree.style(item).unwrap().resolved_opacity();
        assert!(lagging < 0.5);

        for _ in 0..120 {
            ctx.on_frame(&mut tree, 1.0 / 60.0);
        }
        assert_eq!(tree.style(item).unwrap().opacity, Some(0.5));
    }

    #[test]
    fn test_toggle_plays_and_reverses() {
        let (mut tree, section, item) = page();
        let mut ctx = AnimationContext::new("test", section);
        let trigger = ScrollTrigger::parse(section, "top 50%", "bottom 50%")
            .unwrap()
            .toggle_actions("play none play reverse".parse::<ToggleActions>().unwrap());
        let id = ctx
            .add(&mut tree, "pop", linear_fade(item), Some(trigger))
            .unwrap();

        ctx.on_scroll(&mut tree, viewport(0.0));
        assert!(!ctx.timeline(id).unwrap().is_playing());

        ctx.on_scroll(&mut tree, viewport(600.0));
        assert!(ctx.timeline(id).unwrap().is_playing());
        ctx.on_frame(&mut tree, 2.0);
        assert_eq!(tree.style(item).unwrap().opacity, Some(1.0));

        ctx.on_scroll(&mut tree, viewport(100.0));
        ctx.on_frame(&mut tree, 2.0);
        assert_eq!(tree.style(item).unwrap().opacity, Some(0.0));
    }

    #[test]
    fn test_toggle_resume_continues_reversing() {
        let (mut tree, section, item) = page();
        let mut ctx = AnimationContext::new("test", section);
        let trigger = ScrollTrigger::parse(section, "top 50%", "bottom 50%")
            .unwrap()
            .toggle_actions("play reverse resume none".parse::<ToggleActions>().unwrap());
        let id = ctx
            .add(&mut tree, "pop", linear_fade(item), Some(trigger))
            .unwrap();

        ctx.on_scroll(&mut tree, viewport(600.0));
        ctx.on_frame(&mut tree, 2.0);
        assert_eq!(tree.style(item).unwrap().opacity, Some(1.0));

        // Leaving forward reverses; coming back resumes that same direction.
        ctx.on_scroll(&mut tree, viewport(1600.0));
        ctx.on_frame(&mut tree, 0.25);
        ctx.on_scroll(&mut tree, viewport(1000.0));
        assert_eq!(ctx.timeline(id).unwrap().playback(), Playback::Reverse);
        ctx.on_frame(&mut tree, 0.25);
        assert_eq!(tree.style(item).unwrap().opacity, Some(0.5));
    }

    #[test]
    fn test_missing_targets_are_skipped() {
        let (mut tree, section, item) = page();
        let mut ctx = AnimationContext::new("test", section);

        let missing = ctx.select(&tree, "does-not-exist");
        let timeline = Timeline::new().with(
            Tween::to(missing, StyleProps::opacity(1.0)),
            Position::At(0.0),
        );
        assert!(ctx.add(&mut tree, "ghost", timeline, None).is_none());

        let marker = tree
            .append(section, "div", &["marker"], LayoutBox::height(10.0))
            .unwrap();
        tree.remove(marker);
        let trigger = ScrollTrigger::parse(marker, "top top", "bottom top").unwrap();
        assert!(ctx
            .add(&mut tree, "stale", linear_fade(item), Some(trigger))
            .is_none());
        assert_eq!(ctx.binding_count(), 0);
    }

    #[test]
    fn test_detached_scope_does_no_work() {
        let (mut tree, section, item) = page();
        let mut ctx = AnimationContext::new("test", section);
        let trigger = ScrollTrigger::parse(section, "top bottom", "top top").unwrap();
        ctx.add(&mut tree, "fade", linear_fade(item), Some(trigger))
            .unwrap();

        tree.set_attached(section, false);
        let before = tree.mutation_count();
        ctx.on_scroll(&mut tree, viewport(300.0));
        ctx.on_frame(&mut tree, 0.016);
        assert_eq!(tree.mutation_count(), before);
    }

    #[test]
    fn test_revert_restores_style_and_text() {
        let (mut tree, section, item) = page();
        let paragraph = tree
            .append_text(section, "p", &["paragraph"], LayoutBox::height(20.0), "a b c")
            .unwrap();
        tree.apply_style(item, &StyleProps::opacity(0.7));

        let mut ctx = AnimationContext::new("test", section);
        let words = ctx.split_words(&mut tree, paragraph, "word").unwrap();
        assert_eq!(words.len(), 3);
        let trigger = ScrollTrigger::parse(section, "top bottom", "top top").unwrap();
        ctx.add(&mut tree, "fade", linear_fade(item), Some(trigger))
            .unwrap();
        ctx.on_scroll(&mut tree, viewport(900.0));

        ctx.revert(&mut tree);
        assert_eq!(tree.style(item).unwrap().opacity, Some(0.7));
        assert_eq!(tree.text(paragraph), Some("a b c"));
        assert!(tree.query(paragraph, "word").is_empty());
        assert_eq!(ctx.binding_count(), 0);
    }
}
