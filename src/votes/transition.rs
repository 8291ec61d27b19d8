use crate::database::VoteType;

/// (用户, 对象) 在请求前的投票状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    NoVote,
    VotedUp,
    VotedDown,
}

impl From<Option<VoteType>> for VoteState {
    fn from(existing: Option<VoteType>) -> Self {
        match existing {
            None => VoteState::NoVote,
            Some(VoteType::Up) => VoteState::VotedUp,
            Some(VoteType::Down) => VoteState::VotedDown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// 首次投票，新建记录
    Create(VoteType),
    /// 改投另一方向，原地更新
    Flip(VoteType),
    /// 重复提交相同方向，撤销投票
    Retract,
}

impl Transition {
    pub fn decide(existing: Option<VoteType>, requested: VoteType) -> Self {
        match (VoteState::from(existing), requested) {
            (VoteState::NoVote, requested) => Transition::Create(requested),
            (VoteState::VotedUp, VoteType::Up) | (VoteState::VotedDown, VoteType::Down) => {
                Transition::Retract
            }
            (VoteState::VotedUp, VoteType::Down) | (VoteState::VotedDown, VoteType::Up) => {
                Transition::Flip(requested)
            }
        }
    }

    pub fn resulting_state(&self) -> VoteState {
        match self {
            Transition::Create(vote_type) | Transition::Flip(vote_type) => {
                VoteState::from(Some(*vote_type))
            }
            Transition::Retract => VoteState::NoVote,
        }
    }
}
