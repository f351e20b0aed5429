//! Domain Entities
//!
//! The `Room` aggregate and its state transitions. Every transition takes
//! the current time explicitly and either mutates the room completely or
//! returns an error without touching it.

use kernel::id::MemberId;
use puzzle::Puzzle;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    Affiliation, ConfigPatch, GameConfig, JoinPin, Nickname, RoomId, RoomStatus, SecretDigest,
};
use crate::error::{RoomError, RoomResult};

/// Highest `(k)` suffix tried when a nickname is already taken
pub const MAX_NICKNAME_SUFFIX: u32 = 99;

/// Puzzle ids remembered so a reset room does not replay them
pub const RECENT_PUZZLES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub nickname: Nickname,
    pub affiliation: Affiliation,
    pub joined_at: i64,
}

/// One member's submission for the current run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub member_id: MemberId,
    pub nickname: Nickname,
    pub affiliation: Affiliation,
    pub score: u32,
    pub time_ms: u64,
    pub submitted_at: i64,
}

/// Room aggregate, persisted as a single document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub host_secret_digest: SecretDigest,
    pub join_pin: JoinPin,
    pub status: RoomStatus,
    pub created_at: i64,
    pub expires_at: i64,
    pub config: GameConfig,
    pub members: Vec<Member>,
    pub puzzle: Option<Puzzle>,
    pub started_at: Option<i64>,
    pub ended_at: Option<i64>,
    pub results: Vec<GameResult>,
    #[serde(default)]
    pub recent_puzzle_ids: Vec<String>,
    pub version: u64,
}

impl Room {
    /// Fresh lobby with default config and no members
    pub fn new(
        id: RoomId,
        host_secret_digest: SecretDigest,
        join_pin: JoinPin,
        now_ms: i64,
        ttl_ms: i64,
    ) -> Self {
        Self {
            id,
            host_secret_digest,
            join_pin,
            status: RoomStatus::Lobby,
            created_at: now_ms,
            expires_at: now_ms + ttl_ms,
            config: GameConfig::default(),
            members: Vec::new(),
            puzzle: None,
            started_at: None,
            ended_at: None,
            results: Vec::new(),
            recent_puzzle_ids: Vec::new(),
            version: 0,
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at <= now_ms
    }

    pub fn puzzle_id(&self) -> Option<&str> {
        self.puzzle.as_ref().map(|p| p.id.as_str())
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn has_submitted(&self, id: &MemberId) -> bool {
        self.results.iter().any(|r| &r.member_id == id)
    }

    // ========================================================================
    // Authority
    // ========================================================================

    pub fn authorize_host(&self, presented: &str) -> RoomResult<()> {
        if self.host_secret_digest.matches(presented) {
            Ok(())
        } else {
            Err(RoomError::Forbidden)
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Add a member; returns the new member's id
    pub fn join(
        &mut self,
        raw_nickname: &str,
        raw_affiliation: &str,
        pin: &str,
        limits: &JoinLimits,
        now_ms: i64,
    ) -> RoomResult<MemberId> {
        if self.status != RoomStatus::Lobby {
            return Err(RoomError::NotInLobby);
        }
        if !self.join_pin.matches(pin) {
            return Err(RoomError::BadPin);
        }
        let nickname = Nickname::parse(raw_nickname, limits.nickname_max_chars)?;
        let affiliation = Affiliation::parse(raw_affiliation, limits.affiliation_max_chars)?;
        let nickname = self.unique_nickname(nickname)?;

        let member = Member {
            id: MemberId::new(),
            nickname,
            affiliation,
            joined_at: now_ms,
        };
        let id = member.id;
        self.members.push(member);
        self.expires_at = self.expires_at.max(now_ms + limits.ttl_floor_ms);
        Ok(id)
    }

    fn unique_nickname(&self, base: Nickname) -> RoomResult<Nickname> {
        let taken = |candidate: &Nickname| self.members.iter().any(|m| &m.nickname == candidate);
        if !taken(&base) {
            return Ok(base);
        }
        (2..=MAX_NICKNAME_SUFFIX)
            .map(|k| base.with_suffix(k))
            .find(|candidate| !taken(candidate))
            .ok_or(RoomError::NicknameTaken)
    }

    pub fn update_config(&mut self, patch: &ConfigPatch) -> RoomResult<()> {
        if self.status != RoomStatus::Lobby {
            return Err(RoomError::NotInLobby);
        }
        self.config.apply(patch);
        Ok(())
    }

    /// Checked before a puzzle is picked, so a refused start costs nothing
    pub fn ensure_startable(&self) -> RoomResult<()> {
        match self.status {
            RoomStatus::Lobby => Ok(()),
            RoomStatus::Running | RoomStatus::Ended => Err(RoomError::AlreadyStarted),
        }
    }

    pub fn start(&mut self, puzzle: Puzzle, now_ms: i64) -> RoomResult<()> {
        self.ensure_startable()?;
        self.recent_puzzle_ids.push(puzzle.id.clone());
        if self.recent_puzzle_ids.len() > RECENT_PUZZLES {
            let excess = self.recent_puzzle_ids.len() - RECENT_PUZZLES;
            self.recent_puzzle_ids.drain(..excess);
        }
        self.puzzle = Some(puzzle);
        self.started_at = Some(now_ms);
        self.ended_at = None;
        self.results.clear();
        self.status = RoomStatus::Running;
        Ok(())
    }

    /// Record a member's result; `score` and `time_ms` are already checked
    pub fn submit(
        &mut self,
        member_id: &MemberId,
        score: u32,
        time_ms: u64,
        now_ms: i64,
    ) -> RoomResult<()> {
        self.ensure_submittable(member_id)?;
        let member = self.member(member_id).ok_or(RoomError::MemberNotFound)?;
        let result = GameResult {
            member_id: member.id,
            nickname: member.nickname.clone(),
            affiliation: member.affiliation.clone(),
            score,
            time_ms,
            submitted_at: now_ms,
        };
        self.results.push(result);
        Ok(())
    }

    pub fn ensure_running(&self) -> RoomResult<()> {
        if self.status != RoomStatus::Running {
            return Err(RoomError::NotRunning);
        }
        Ok(())
    }

    /// State, membership and once-per-run checks, in that order
    pub fn ensure_submittable(&self, member_id: &MemberId) -> RoomResult<()> {
        self.ensure_running()?;
        if self.member(member_id).is_none() {
            return Err(RoomError::MemberNotFound);
        }
        if self.has_submitted(member_id) {
            return Err(RoomError::AlreadySubmitted);
        }
        Ok(())
    }

    /// End the run; a second end is a no-op
    pub fn end(&mut self, now_ms: i64, ttl_ms: i64) -> RoomResult<()> {
        match self.status {
            RoomStatus::Ended => Ok(()),
            RoomStatus::Lobby => Err(RoomError::NotRunning),
            RoomStatus::Running => {
                self.status = RoomStatus::Ended;
                self.ended_at = Some(now_ms);
                self.expires_at = now_ms + ttl_ms;
                Ok(())
            }
        }
    }

    /// Back to the lobby with the same members
    pub fn reset(&mut self) -> RoomResult<()> {
        if self.status == RoomStatus::Running {
            return Err(RoomError::CannotResetNow);
        }
        self.status = RoomStatus::Lobby;
        self.puzzle = None;
        self.started_at = None;
        self.ended_at = None;
        self.results.clear();
        Ok(())
    }
}

/// Input caps and lifetime extension applied on join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinLimits {
    pub nickname_max_chars: usize,
    pub affiliation_max_chars: usize,
    pub ttl_floor_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::HostSecret;
    use puzzle::{Difficulty, PickPolicy, pick};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const NOW: i64 = 1_700_000_000_000;
    const HOUR: i64 = 3_600_000;

    fn limits() -> JoinLimits {
        JoinLimits {
            nickname_max_chars: 20,
            affiliation_max_chars: 30,
            ttl_floor_ms: HOUR,
        }
    }

    fn lobby() -> (Room, HostSecret) {
        let secret = HostSecret::generate();
        let room = Room::new(
            RoomId::parse("ABCDEF").unwrap(),
            secret.digest(),
            JoinPin::fixed("123456"),
            NOW,
            3 * HOUR,
        );
        (room, secret)
    }

    fn puzzle() -> Puzzle {
        pick(Difficulty::Easy, &[], &PickPolicy::default(), &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_new_room_defaults() {
        let (room, _) = lobby();
        assert_eq!(room.status, RoomStatus::Lobby);
        assert_eq!(room.expires_at, NOW + 3 * HOUR);
        assert_eq!(room.config, GameConfig::default());
        assert!(room.members.is_empty());
        assert!(room.puzzle.is_none());
    }

    #[test]
    fn test_expiry_boundary() {
        let (room, _) = lobby();
        assert!(!room.is_expired(room.expires_at - 1));
        assert!(room.is_expired(room.expires_at));
    }

    #[test]
    fn test_host_authority() {
        let (room, secret) = lobby();
        assert!(room.authorize_host(secret.as_str()).is_ok());
        assert!(matches!(room.authorize_host(""), Err(RoomError::Forbidden)));
        assert!(matches!(room.authorize_host("nope"), Err(RoomError::Forbidden)));
    }

    #[test]
    fn test_join_dedupes_nicknames() {
        let (mut room, _) = lobby();
        room.join("Alex", "KR", "123456", &limits(), NOW).unwrap();
        room.join(" Alex ", "JP", "123456", &limits(), NOW).unwrap();
        room.join("Alex", "US", "123456", &limits(), NOW).unwrap();
        let names: Vec<_> = room.members.iter().map(|m| m.nickname.as_str()).collect();
        assert_eq!(names, vec!["Alex", "Alex(2)", "Alex(3)"]);
    }

    #[test]
    fn test_join_suffix_exhaustion() {
        let (mut room, _) = lobby();
        for _ in 0..MAX_NICKNAME_SUFFIX {
            room.join("Sam", "KR", "123456", &limits(), NOW).unwrap();
        }
        let before = room.clone();
        assert!(matches!(
            room.join("Sam", "KR", "123456", &limits(), NOW),
            Err(RoomError::NicknameTaken)
        ));
        assert_eq!(room, before);
    }

    #[test]
    fn test_join_checks() {
        let (mut room, _) = lobby();
        assert!(matches!(
            room.join("A", "KR", "000000", &limits(), NOW),
            Err(RoomError::BadPin)
        ));
        assert!(matches!(
            room.join("", "KR", "123456", &limits(), NOW),
            Err(RoomError::NicknameRequired)
        ));
        assert!(matches!(
            room.join("A", " ", "123456", &limits(), NOW),
            Err(RoomError::AffiliationRequired)
        ));
        assert!(room.members.is_empty());
    }

    #[test]
    fn test_join_extends_expiry() {
        let (mut room, _) = lobby();
        let late = room.expires_at - 10;
        room.join("A", "KR", "123456", &limits(), late).unwrap();
        assert_eq!(room.expires_at, late + HOUR);

        let (mut room, _) = lobby();
        room.join("A", "KR", "123456", &limits(), NOW).unwrap();
        assert_eq!(room.expires_at, NOW + 3 * HOUR);
    }

    #[test]
    fn test_full_lifecycle() {
        let (mut room, _) = lobby();
        let alex = room.join("Alex", "KR", "123456", &limits(), NOW).unwrap();

        room.start(puzzle(), NOW + 1).unwrap();
        assert_eq!(room.status, RoomStatus::Running);
        assert!(matches!(
            room.join("Late", "KR", "123456", &limits(), NOW),
            Err(RoomError::NotInLobby)
        ));

        room.submit(&alex, 5, 90_000, NOW + 2).unwrap();
        assert!(matches!(
            room.submit(&alex, 5, 90_000, NOW + 3),
            Err(RoomError::AlreadySubmitted)
        ));
        assert!(matches!(
            room.submit(&MemberId::new(), 5, 1, NOW + 3),
            Err(RoomError::MemberNotFound)
        ));
        assert!(matches!(room.reset(), Err(RoomError::CannotResetNow)));

        room.end(NOW + 4, 30 * 60_000).unwrap();
        assert_eq!(room.status, RoomStatus::Ended);
        assert_eq!(room.expires_at, NOW + 4 + 30 * 60_000);
        let ended = room.clone();
        room.end(NOW + 5, 30 * 60_000).unwrap();
        assert_eq!(room, ended);

        room.reset().unwrap();
        assert_eq!(room.status, RoomStatus::Lobby);
        assert_eq!(room.members, ended.members);
        assert!(room.results.is_empty() && room.puzzle.is_none());
        assert!(room.started_at.is_none() && room.ended_at.is_none());
        assert_eq!(room.recent_puzzle_ids.len(), 1);
    }

    #[test]
    fn test_recent_puzzles_are_capped() {
        let (mut room, _) = lobby();
        for i in 0..(RECENT_PUZZLES + 3) {
            let mut p = puzzle();
            p.id = format!("p-{i}");
            room.start(p, NOW).unwrap();
            room.end(NOW, 1).unwrap();
            room.reset().unwrap();
        }
        assert_eq!(room.recent_puzzle_ids.len(), RECENT_PUZZLES);
        assert_eq!(room.recent_puzzle_ids[0], "p-3");
    }

    #[test]
    fn test_room_serde_roundtrip_keeps_digest() {
        let (mut room, secret) = lobby();
        room.join("Alex", "KR", "123456", &limits(), NOW).unwrap();
        let json = serde_json::to_value(&room).unwrap();
        assert!(!json.to_string().contains(secret.as_str()));
        let back: Room = serde_json::from_value(json).unwrap();
        assert_eq!(back, room);
    }
}
