pub mod group_members;
pub mod memories;
pub mod memory_groups;
pub mod users;

pub use group_members::Entity as GroupMembers;
pub use group_members::Model as GroupMember;
pub use memories::Entity as Memories;
pub use memories::Model as Memory;
pub use memory_groups::Entity as MemoryGroups;
pub use memory_groups::Model as MemoryGroup;
pub use users::Entity as Users;
pub use users::Model as User;
