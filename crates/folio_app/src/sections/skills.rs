//! Skills section: a scroll-drawn beam with one block per skill category

use anyhow::Result;
use folio_animation::{AnimationContext, Easing, Position, ScrollTrigger, Timeline, Tween};
use folio_core::{CoreError, ElementId, LayoutBox, Rgba, StyleProps, VisualTree};

use super::{Section, SectionKind};
use crate::config::FolioConfig;
use crate::skills::skills_table;

const NODE_IDLE: Rgba = [0.25, 0.25, 0.25, 1.0];
const NODE_ACTIVE: Rgba = [1.0, 1.0, 1.0, 1.0];
const TAGS_PER_ROW: usize = 4;
const TAG_ROW_HEIGHT: f32 = 44.0;

pub struct Skills;

impl Skills {
    fn timeline_track(tree: &mut VisualTree, parent: ElementId) -> Result<(), CoreError> {
        // Overlay track: positioned over the categories, takes no flow space.
        let track = tree.append(parent, "div", &["timeline-container"], LayoutBox::height(0.0))?;
        tree.append(track, "div", &["start-dot"], LayoutBox::height(0.0))?;
        tree.append(track, "div", &["track-line"], LayoutBox::height(0.0))?;
        let beam = tree.append(track, "div", &["timeline-beam"], LayoutBox::height(0.0))?;
        tree.append(beam, "div", &["beam-tip"], LayoutBox::height(0.0))?;
        tree.append(track, "div", &["end-dot"], LayoutBox::height(0.0))?;
        tree.apply_style(beam, &StyleProps::default().with_height(0.0));
        Ok(())
    }
}

impl Section for Skills {
    fn kind(&self) -> SectionKind {
        SectionKind::Skills
    }

    fn build(
        &self,
        tree: &mut VisualTree,
        parent: ElementId,
        config: &FolioConfig,
    ) -> Result<ElementId, CoreError> {
        let section = tree.append(
            parent,
            "section",
            &["skills"],
            LayoutBox::height(config.sections.skills_height).padded(100.0),
        )?;
        let container = tree.append(section, "div", &["skills-container"], LayoutBox::auto())?;
        Self::timeline_track(tree, container)?;

        let categories = tree.append(
            container,
            "div",
            &["categories-container"],
            LayoutBox::auto(),
        )?;
        for (index, category) in skills_table().iter().enumerate() {
            let side = if index % 2 == 0 { "left" } else { "right" };
            let wrapper = tree.append(
                categories,
                "div",
                &["category-wrapper", side],
                LayoutBox::auto().padded(60.0),
            )?;

            let node = tree.append(wrapper, "div", &["timeline-node"], LayoutBox::height(16.0))?;
            tree.apply_style(node, &StyleProps::default().with_border_color(NODE_IDLE));
            let connector = tree.append(wrapper, "div", &["connector"], LayoutBox::height(2.0))?;
            tree.apply_style(connector, &StyleProps::opacity(0.0).with_scale_x(0.0));

            let content = tree.append(wrapper, "div", &["category-content"], LayoutBox::auto())?;
            tree.append_text(
                content,
                "h3",
                &["category-title"],
                LayoutBox::height(40.0),
                category.title,
            )?;
            let rows = category.skills.len().div_ceil(TAGS_PER_ROW);
            let grid = tree.append(
                content,
                "div",
                &["skills-grid"],
                LayoutBox::height(rows as f32 * TAG_ROW_HEIGHT),
            )?;
            for skill in category.skills {
                let tag = tree.append(grid, "div", &["skill-tag"], LayoutBox::height(0.0))?;
                tree.append_text(tag, "span", &["skill-name"], LayoutBox::height(0.0), skill.name)?;
            }
        }
        Ok(section)
    }

    fn choreograph(&self, ctx: &mut AnimationContext, tree: &mut VisualTree) -> Result<()> {
        let scope = ctx.scope();

        let track_height = ctx
            .select_first(tree, "categories-container")
            .and_then(|c| tree.rect(c))
            .map_or(0.0, |r| r.height);
        let beam = Timeline::new().with(
            Tween::to(
                ctx.select(tree, "timeline-beam"),
                StyleProps::default().with_height(track_height),
            )
            .ease(Easing::Linear),
            Position::At(0.0),
        );
        let trigger = ScrollTrigger::parse(scope, "top center", "bottom center")?.scrub(0.5);
        ctx.add(tree, "skills-beam", beam, Some(trigger));

        for category in ctx.select(tree, "category-wrapper") {
            let node = ctx.select_in(tree, category, "timeline-node");
            let connector = ctx.select_in(tree, category, "connector");
            let heading = ctx
                .select_in(tree, category, "category-title")
                .into_iter()
                .chain(ctx.select_in(tree, category, "category-content"));
            let tags = ctx.select_in(tree, category, "skill-tag");

            let timeline = Timeline::new()
                .with(
                    Tween::to(
                        node,
                        StyleProps::scale(1.5)
                            .with_border_color(NODE_ACTIVE)
                            .with_glow(20.0, 0.6),
                    )
                    .duration(0.3)
                    .ease("back.out(1.7)".parse()?),
                    Position::default(),
                )
                .with(
                    Tween::to(connector, StyleProps::opacity(1.0).with_scale_x(1.0))
                        .duration(0.4)
                        .ease("power2.out".parse()?),
                    "-=0.1".parse()?,
                )
                .with(
                    Tween::from_to(
                        heading,
                        StyleProps::opacity(0.0).with_y(20.0),
                        StyleProps::opacity(1.0).with_y(0.0),
                    )
                    .duration(0.5)
                    .stagger(0.1),
                    "-=0.2".parse()?,
                )
                .with(
                    Tween::from_to(
                        tags,
                        StyleProps::opacity(0.0).with_scale(0.8).with_y(10.0),
                        StyleProps::opacity(1.0).with_scale(1.0).with_y(0.0),
                    )
                    .duration(0.3)
                    .stagger(0.03)
                    .ease("back.out(1.2)".parse()?),
                    "-=0.3".parse()?,
                );

            let trigger = ScrollTrigger::parse(category, "top 55%", "bottom 55%")?
                .toggle_actions("play none play reverse".parse()?);
            ctx.add(tree, "skills-category", timeline, Some(trigger));
        }
        Ok(())
    }
}
