use bitflags::bitflags;

bitflags! {
    /// What an actor may do to blocks at a location.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Privileges: u8 {
        const CAN_PLACE_BLOCKS = 1;
        const CAN_BREAK_BLOCKS = 2;
    }
}

impl Privileges {
    /// Everything a member (or anyone on unclaimed ground) may do.
    pub const MEMBER: Privileges = Privileges::all();
    /// Outsiders on guarded ground.
    pub const OUTSIDER: Privileges = Privileges::empty();

    pub fn can_place(self) -> bool {
        self.contains(Privileges::CAN_PLACE_BLOCKS)
    }

    pub fn can_break(self) -> bool {
        self.contains(Privileges::CAN_BREAK_BLOCKS)
    }
}
