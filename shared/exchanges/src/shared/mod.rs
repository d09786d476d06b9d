pub mod deserializers;
pub mod serializers;
