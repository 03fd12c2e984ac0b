//! Hover accents for committee images

use crate::config::HoverConfig;
use crate::dom::Dom;
use crate::event::{Binding, EventKind, Handler, ListenTarget};

pub const IMAGE_CLASS: &str = "committee-image";

#[derive(Debug)]
pub struct HoverAccent<N> {
    images: Vec<N>,
    config: HoverConfig,
}

impl<N: Clone> HoverAccent<N> {
    pub fn new(config: &HoverConfig) -> Self {
        Self {
            images: Vec::new(),
            config: config.clone(),
        }
    }

    pub fn attach<D: Dom<Node = N>>(&mut self, doc: &D) -> Vec<Binding<N>> {
        self.images = doc.elements_by_class(IMAGE_CLASS);
        self.images
            .iter()
            .flat_map(|image| {
                let target = ListenTarget::Element(image.clone());
                [
                    Binding::passive(
                        target.clone(),
                        EventKind::PointerEnter,
                        Handler::HoverEnter(image.clone()),
                    ),
                    Binding::passive(
                        target,
                        EventKind::PointerLeave,
                        Handler::HoverLeave(image.clone()),
                    ),
                ]
            })
            .collect()
    }

    pub fn detach(&mut self) {
        self.images.clear();
    }

    pub fn on_enter<D: Dom<Node = N>>(&self, doc: &mut D, image: &N) {
        doc.set_style(image, "box-shadow", &self.config.raised_shadow);
    }

    pub fn on_leave<D: Dom<Node = N>>(&self, doc: &mut D, image: &N) {
        doc.set_style(image, "box-shadow", &self.config.resting_shadow);
    }
}
