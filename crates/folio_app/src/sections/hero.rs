//! Hero section: name, title, portrait and scroll indicator

use anyhow::Result;
use folio_animation::{AnimationContext, Easing, Position, ScrollTrigger, Timeline, Tween};
use folio_core::{CoreError, ElementId, LayoutBox, StyleProps, VisualTree};

use super::{Section, SectionKind};
use crate::config::FolioConfig;

pub const NAME: &str = "MAHADEVAN REJI";
pub const TITLE: &str = "FULL STACK DEVELOPER";
pub const SCROLL_LABEL: &str = "SCROLL";

pub struct Hero;

impl Section for Hero {
    fn kind(&self) -> SectionKind {
        SectionKind::Hero
    }

    fn build(
        &self,
        tree: &mut VisualTree,
        parent: ElementId,
        config: &FolioConfig,
    ) -> Result<ElementId, CoreError> {
        let hero = tree.append(
            parent,
            "section",
            &["hero"],
            LayoutBox::height(config.sections.hero_height),
        )?;

        let content = tree.append(hero, "div", &["hero-content"], LayoutBox::auto().padded(80.0))?;
        tree.append_text(content, "h1", &["hero-name"], LayoutBox::height(120.0), NAME)?;
        tree.append_text(content, "p", &["hero-title"], LayoutBox::height(40.0), TITLE)?;

        let image = tree.append(content, "div", &["hero-image"], LayoutBox::height(360.0))?;
        tree.append(image, "img", &["hero-photo"], LayoutBox::height(360.0))?;
        // Portrait starts fully clipped from the right.
        tree.apply_style(image, &StyleProps::default().with_clip_inset(0.0, 100.0, 0.0, 0.0));

        let indicator = tree.append(hero, "div", &["scroll-indicator"], LayoutBox::height(80.0))?;
        tree.append_text(
            indicator,
            "span",
            &["scroll-text"],
            LayoutBox::height(20.0),
            SCROLL_LABEL,
        )?;
        tree.append(indicator, "div", &["scroll-line"], LayoutBox::height(60.0))?;
        Ok(hero)
    }

    fn choreograph(&self, ctx: &mut AnimationContext, tree: &mut VisualTree) -> Result<()> {
        let name = ctx.select(tree, "hero-name");
        let title = ctx.select(tree, "hero-title");
        let image = ctx.select(tree, "hero-image");

        ctx.set(tree, &name, &StyleProps::opacity(0.0).with_x(-100.0));
        ctx.set(tree, &title, &StyleProps::opacity(0.0).with_x(-80.0));

        let mut load = Timeline::new().default_ease("power3.out".parse()?);
        load.add(
            Tween::to(name.clone(), StyleProps::opacity(1.0).with_x(0.0)).duration(1.2),
            Position::At(0.3),
        );
        load.add(
            Tween::to(title.clone(), StyleProps::opacity(1.0).with_x(0.0)).duration(1.0),
            Position::At(0.5),
        );
        load.add(
            Tween::to(
                image.clone(),
                StyleProps::default().with_clip_inset(0.0, 0.0, 0.0, 0.0),
            )
            .duration(1.4)
            .ease("power3.inOut".parse()?),
            Position::At(0.6),
        );
        if let Some(label) = ctx.select_first(tree, "scroll-text") {
            let text = tree.text(label).unwrap_or(SCROLL_LABEL).to_string();
            load.add(Tween::typing(label, text).duration(0.8), Position::At(1.2));
        }
        if let Some(id) = ctx.add(tree, "hero-load", load, None) {
            ctx.play(id);
        }

        let scope = ctx.scope();
        for (label, targets, y) in [
            ("hero-title-parallax", title, 200.0),
            ("hero-name-parallax", name, 150.0),
            ("hero-image-parallax", image, 80.0),
        ] {
            let parallax = Timeline::new().with(
                Tween::to(targets, StyleProps::default().with_y(y)).ease(Easing::Linear),
                Position::At(0.0),
            );
            let trigger = ScrollTrigger::parse(scope, "top top", "bottom top")?.scrub(1.0);
            ctx.add(tree, label, parallax, Some(trigger));
        }
        Ok(())
    }
}
