//! About section: corner ticks framing four word-revealed paragraphs

use anyhow::Result;
use folio_animation::{AnimationContext, Easing, Position, ScrollTrigger, Timeline, Tween};
use folio_core::{CoreError, ElementId, LayoutBox, StyleProps, VisualTree};

use super::{text_block_height, Section, SectionKind};
use crate::config::FolioConfig;

pub const PARAGRAPHS: [&str; 4] = [
    "Hey, I'm Mahadevan Reji — most people call me Kichu.",
    "I'm a Full Stack Developer who builds systems that are precise and alive. I like structure, but I also like when things move and feel designed.",
    "I spend my time turning ideas into engineered experiences — fast backends in Rust, smooth interfaces in React Native. My work sits at the intersection of clarity and motion.",
    "Right now, I'm focused on making the web feel intentional — every pixel, every line, every frame.",
];

/// Corner bars: class, whether the bar grows in width or height, start time
const CORNER_BARS: [(&str, bool, f32); 4] = [
    ("top-left-horizontal", true, 0.0),
    ("top-left-vertical", false, 0.3),
    ("bottom-right-horizontal", true, 0.4),
    ("bottom-right-vertical", false, 0.7),
];

const BAR_LENGTH: f32 = 50.0;

pub struct About;

impl About {
    fn corner(
        tree: &mut VisualTree,
        parent: ElementId,
        position: &str,
    ) -> Result<ElementId, CoreError> {
        let corner = tree.append(parent, "div", &["corner", position], LayoutBox::height(50.0))?;
        let horizontal = format!("{position}-horizontal");
        let vertical = format!("{position}-vertical");
        tree.append(corner, "div", &[horizontal.as_str()], LayoutBox::height(2.0))?;
        tree.append(corner, "div", &[vertical.as_str()], LayoutBox::height(2.0))?;
        Ok(corner)
    }
}

impl Section for About {
    fn kind(&self) -> SectionKind {
        SectionKind::About
    }

    fn build(
        &self,
        tree: &mut VisualTree,
        parent: ElementId,
        config: &FolioConfig,
    ) -> Result<ElementId, CoreError> {
        let about = tree.append(
            parent,
            "section",
            &["about"],
            LayoutBox::height(config.sections.about_height).padded(120.0),
        )?;
        let frame = tree.append(about, "div", &["frame"], LayoutBox::auto())?;
        Self::corner(tree, frame, "top-left")?;

        let text = tree.append(frame, "div", &["text-container"], LayoutBox::auto().padded(24.0))?;
        for paragraph in PARAGRAPHS {
            let height = text_block_height(paragraph, config.viewport.width, 36.0) + 32.0;
            tree.append_text(text, "p", &["paragraph"], LayoutBox::height(height), paragraph)?;
        }

        Self::corner(tree, frame, "bottom-right")?;
        Ok(about)
    }

    fn choreograph(&self, ctx: &mut AnimationContext, tree: &mut VisualTree) -> Result<()> {
        let scope = ctx.scope();

        let mut corners = Timeline::new();
        for (class, horizontal, at) in CORNER_BARS {
            let (from, to) = if horizontal {
                (
                    StyleProps::opacity(0.0).with_width(0.0),
                    StyleProps::opacity(1.0).with_width(BAR_LENGTH),
                )
            } else {
                (
                    StyleProps::opacity(0.0).with_height(0.0),
                    StyleProps::opacity(1.0).with_height(BAR_LENGTH),
                )
            };
            corners.add(
                Tween::from_to(ctx.select(tree, class), from, to)
                    .duration(0.3)
                    .ease("power2.out".parse()?),
                Position::At(at),
            );
        }
        let trigger = ScrollTrigger::parse(scope, "top 75%", "top 45%")?.scrub(1.2);
        ctx.add(tree, "about-corners", corners, Some(trigger));

        for paragraph in ctx.select(tree, "paragraph") {
            let words = ctx.split_words(tree, paragraph, "word")?;
            let reveal = Timeline::new().with(
                Tween::from_to(words, StyleProps::opacity(0.2), StyleProps::opacity(1.0))
                    .stagger(0.03)
                    .ease(Easing::Linear),
                Position::At(0.0),
            );
            let trigger = ScrollTrigger::parse(paragraph, "top 75%", "bottom 60%")?.scrub(1.0);
            ctx.add(tree, "about-words", reveal, Some(trigger));
        }

        let glow = Timeline::new().with(
            Tween::to(
                ctx.select(tree, "corner"),
                StyleProps::default().with_glow(4.0, 0.4),
            )
            .ease(Easing::Linear),
            Position::At(0.0),
        );
        let trigger = ScrollTrigger::parse(scope, "top 40%", "top 20%")?.scrub(1.0);
        ctx.add(tree, "about-glow", glow, Some(trigger));
        Ok(())
    }
}
