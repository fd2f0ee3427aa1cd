/// Generates `new` and the [`ActorClient`](crate::clients::ActorClient) impl
/// for a client that wraps a single `inner: ResourceClient<$entity>`.
#[macro_export]
macro_rules! impl_actor_client {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }

        impl $crate::clients::ActorClient<$entity> for $client_name {
            fn inner(&self) -> &$crate::actor_framework::ResourceClient<$entity> {
                &self.inner
            }
        }
    };
}
