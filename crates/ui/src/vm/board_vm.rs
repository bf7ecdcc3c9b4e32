use nurse_core::model::{
    AssessmentKind, CHALLENGE_COUNT, ChallengeId, GameState, ItemId, Screen,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeCardVm {
    pub id: ChallengeId,
    pub label: String,
    pub complete: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssessmentButtonVm {
    pub kind: AssessmentKind,
    pub title: &'static str,
    pub done: bool,
    pub enabled: bool,
}

impl AssessmentButtonVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.done {
            "assessment-button done"
        } else if self.enabled {
            "assessment-button"
        } else {
            "assessment-button locked"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemButtonVm {
    pub item: ItemId,
    pub clicked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogVm {
    Closed,
    Challenge {
        id: ChallengeId,
        label: String,
        buttons: Vec<AssessmentButtonVm>,
    },
    Assessment {
        id: ChallengeId,
        kind: AssessmentKind,
        title: &'static str,
        items: Vec<ItemButtonVm>,
        clicked: usize,
        required: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardVm {
    pub cards: Vec<ChallengeCardVm>,
    pub completed: usize,
    pub total: usize,
    pub dialog: DialogVm,
}

#[must_use]
pub fn map_board(state: &GameState) -> BoardVm {
    let progress = state.progress();
    let cards = ChallengeId::all()
        .map(|id| ChallengeCardVm {
            id,
            label: id.label(),
            complete: progress.completion(id).complete,
        })
        .collect();

    let dialog = match state.screen() {
        Screen::Board => DialogVm::Closed,
        Screen::Challenge(id) => {
            let flags = progress.completion(id);
            let buttons = AssessmentKind::ALL
                .into_iter()
                .map(|kind| AssessmentButtonVm {
                    kind,
                    title: kind.title(),
                    done: flags.is_done(kind),
                    enabled: progress.can_start(id, kind),
                })
                .collect();
            DialogVm::Challenge {
                id,
                label: id.label(),
                buttons,
            }
        }
        Screen::Assessment(id, kind) => {
            let items = kind
                .items()
                .into_iter()
                .map(|item| ItemButtonVm {
                    clicked: progress.is_clicked(id, kind, &item),
                    item,
                })
                .collect();
            DialogVm::Assessment {
                id,
                kind,
                title: kind.title(),
                items,
                clicked: progress.clicked(id, kind).map_or(0, |set| set.len()),
                required: kind.required_items(),
            }
        }
    };

    BoardVm {
        cards,
        completed: progress.completed_count(),
        total: CHALLENGE_COUNT,
        dialog,
    }
}
