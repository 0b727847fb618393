use crate::execution::QueryEvent;
use crate::execution::QueryEventListener;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::schema::SchemaOptions;
use std::sync::Arc;
use std::sync::Mutex;

pub(crate) const TEST_SCHEMA_SDL: &str = r#"
directive @upper on FIELD
directive @tag(name: String!) repeatable on FIELD | INLINE_FRAGMENT | FRAGMENT_SPREAD

interface Node {
  id: ID!
}

interface Named {
  name: String
}

enum Role {
  ADMIN
  MEMBER
}

input UserFilter {
  role: Role!
  nameContains: String
  limit: Int = 5
}

type User implements Node & Named {
  id: ID!
  name: String
  role: Role
  friends(first: Int = 10): [User!]!
  posts: [Post]
  bestFriend: User
}

type Post implements Node {
  id: ID!
  title: String!
  summary: String
  author: User!
}

union SearchResult = User | Post

type Query {
  hello: String
  node(id: ID!): Node
  search(term: String!): [SearchResult!]!
  user(id: ID!): User
  users(filter: UserFilter, ids: [ID!]): [User!]!
}

type Mutation {
  renameUser(id: ID!, name: String!): User
}

type Subscription {
  userAdded: User
  userRemoved: User
}
"#;

pub(crate) fn test_schema_builder() -> SchemaBuilder {
    SchemaBuilder::from_str("test", TEST_SCHEMA_SDL)
        .expect("test schema parses")
}

pub(crate) fn test_schema() -> Arc<Schema> {
    test_schema_with_options(SchemaOptions::default())
}

pub(crate) fn test_schema_with_options(options: SchemaOptions) -> Arc<Schema> {
    Arc::new(
        test_schema_builder()
            .with_options(options)
            .build()
            .expect("test schema builds"),
    )
}

/// `{ user { ...F0 } }` where every `F{n}` selects `bestFriend` and spreads
/// `F{n+1}` twice inside it; `F{levels}` selects `name`.
pub(crate) fn doubled_fragment_chain(levels: usize) -> String {
    let mut query = String::from("{ user(id: 1) { ...F0 } }\n");
    for level in 0..levels {
        let next = level + 1;
        query.push_str(&format!(
            "fragment F{level} on User {{ bestFriend {{ ...F{next} ...F{next} }} }}\n",
        ));
    }
    query.push_str(&format!("fragment F{levels} on User {{ name }}\n"));
    query
}

/// Collects every event it is sent.
#[derive(Debug, Default)]
pub(crate) struct RecordingListener {
    events: Mutex<Vec<QueryEvent>>,
}
impl RecordingListener {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.names().iter().filter(|event| **event == name).count()
    }

    pub(crate) fn events(&self) -> Vec<QueryEvent> {
        self.events.lock().expect("listener lock").clone()
    }

    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(QueryEvent::name).collect()
    }
}
impl QueryEventListener for RecordingListener {
    fn record(&self, event: &QueryEvent) {
        self.events.lock().expect("listener lock").push(event.clone());
    }
}
