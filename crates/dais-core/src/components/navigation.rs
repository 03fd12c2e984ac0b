//! Card and Member Navigation
//!
//! Committee cards and secretariat entries behave like large links: a click
//! plays a short press animation, then loads the page named by the entry's
//! slug.

use crate::config::{PressConfig, RouteConfig};
use crate::dom::Dom;
use crate::event::{Binding, EventData, EventKind, Handler, ListenTarget, Outcome};
use crate::scheduler::Scheduler;

use super::TimerTask;

/// Category of a clickable entry
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum CardKind {
    /// `.committee-card` with a `data-committee` slug
    Committee,
    /// `.secretariat-member` with a `data-member` slug
    Member,
}

impl CardKind {
    pub fn class(&self) -> &'static str {
        match self {
            CardKind::Committee => "committee-card",
            CardKind::Member => "secretariat-member",
        }
    }

    /// Data attribute key holding the slug
    pub fn data_key(&self) -> &'static str {
        match self {
            CardKind::Committee => "committee",
            CardKind::Member => "member",
        }
    }

    fn prefix<'a>(&self, routes: &'a RouteConfig) -> &'a str {
        match self {
            CardKind::Committee => &routes.committee_prefix,
            CardKind::Member => &routes.member_prefix,
        }
    }
}

/// Page path for a slug; the slug is used verbatim
pub fn route_for(kind: CardKind, slug: &str, routes: &RouteConfig) -> String {
    format!("{}/{}.html", kind.prefix(routes), slug)
}

#[derive(Debug)]
pub struct CardNavigator<N> {
    cards: Vec<N>,
    members: Vec<N>,
    press: PressConfig,
    routes: RouteConfig,
}

impl<N: Clone> CardNavigator<N> {
    pub fn new(press: &PressConfig, routes: &RouteConfig) -> Self {
        Self {
            cards: Vec::new(),
            members: Vec::new(),
            press: press.clone(),
            routes: routes.clone(),
        }
    }

    pub fn attach<D: Dom<Node = N>>(&mut self, doc: &mut D) -> Vec<Binding<N>> {
        self.cards = doc.elements_by_class(CardKind::Committee.class());
        self.members = doc.elements_by_class(CardKind::Member.class());

        for member in &self.members {
            doc.set_style(member, "cursor", "pointer");
        }

        let cards = self.cards.iter().map(|node| (node, CardKind::Committee));
        let members = self.members.iter().map(|node| (node, CardKind::Member));
        cards
            .chain(members)
            .map(|(node, kind)| {
                // Member entries may wrap an anchor whose default must be suppressed
                let handler = Handler::CardClick { node: node.clone(), kind };
                let target = ListenTarget::Element(node.clone());
                match kind {
                    CardKind::Committee => Binding::passive(target, EventKind::Click, handler),
                    CardKind::Member => Binding::active(target, EventKind::Click, handler),
                }
            })
            .collect()
    }

    pub fn detach(&mut self) {
        self.cards.clear();
        self.members.clear();
    }

    pub fn on_click<D: Dom<Node = N>>(
        &mut self,
        doc: &mut D,
        sched: &mut Scheduler<TimerTask<N>>,
        now: i64,
        node: &N,
        kind: CardKind,
        event: &EventData<N>,
    ) -> Outcome {
        let mut outcome = Outcome::default();
        if kind == CardKind::Member {
            let on_link = event
                .target
                .as_ref()
                .and_then(|target| doc.closest_tag(target, "a"))
                .is_some();
            if on_link {
                outcome = Outcome::prevented();
            }
        }

        doc.set_style(node, "transform", &self.press.transform);
        sched.schedule_after(
            now,
            self.press.delay_ms,
            TimerTask::PressRelease {
                node: node.clone(),
                kind,
            },
        );
        outcome
    }

    /// End of the press animation: revert the transform and follow the slug
    pub fn on_release<D: Dom<Node = N>>(&mut self, doc: &mut D, node: &N, kind: CardKind) {
        doc.set_style(node, "transform", "");

        match doc.data_attr(node, kind.data_key()) {
            Some(slug) => {
                let href = route_for(kind, &slug, &self.routes);
                tracing::debug!(%href, "Navigating from {:?} entry", kind);
                doc.navigate(&href);
            }
            None => {
                tracing::warn!("No data-{} found for this card", kind.data_key());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_kind_contract() {
        assert_eq!(CardKind::Committee.class(), "committee-card");
        assert_eq!(CardKind::Committee.data_key(), "committee");
        assert_eq!(CardKind::Member.class(), "secretariat-member");
        assert_eq!(CardKind::Member.data_key(), "member");
    }

    #[test]
    fn routes_use_slug_verbatim() {
        let routes = RouteConfig::default();
        assert_eq!(route_for(CardKind::Committee, "legal", &routes), "committees/legal.html");
        assert_eq!(
            route_for(CardKind::Member, "secretary-general", &routes),
            "secretariat/secretary-general.html"
        );
        assert_eq!(route_for(CardKind::Committee, "../x y", &routes), "committees/../x y.html");
    }

    #[test]
    fn custom_prefixes() {
        let routes = RouteConfig {
            committee_prefix: "c".to_string(),
            member_prefix: "team".to_string(),
        };
        assert_eq!(route_for(CardKind::Member, "ana", &routes), "team/ana.html");
    }
}
