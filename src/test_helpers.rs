pub mod objects;
pub mod resolvers;
