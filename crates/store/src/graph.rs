use anyhow::{Context, Result};
use neo4rs::{Graph, Query};
use prompts::GRAPH_FIELD_SEP;

use crate::records::{EntityRecord, GraphStats, RelationshipRecord};

/// Knowledge-graph persistence over Neo4j. Nodes are keyed by entity
/// name; edges carry the relationship payload. All writes use MERGE so
/// repeated inserts converge.
pub struct GraphStore {
    graph: Graph,
}

impl GraphStore {
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .context("failed to connect to Neo4j")?;
        Ok(Self { graph })
    }

    pub async fn init_schema(&self) -> Result<()> {
        let query = Query::new(
            "CREATE INDEX entity_name_index IF NOT EXISTS FOR (e:Entity) ON (e.name)".to_string(),
        );
        self.graph
            .run(query)
            .await
            .context("failed to create index on Entity.name")?;
        Ok(())
    }

    pub async fn get_entity(&self, name: &str) -> Result<Option<EntityRecord>> {
        let query = Query::new(
            r#"
            MATCH (e:Entity {name: $name})
            RETURN e.name as name, e.type as type, e.description as description,
                   e.source_ids as source_ids
            "#
            .to_string(),
        )
        .param("name", name.to_string());

        let mut result = self.graph.execute(query).await?;

        match result.next().await? {
            Some(row) => Ok(Some(entity_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn upsert_entity(&self, entity: &EntityRecord) -> Result<()> {
        let query = Query::new(
            r#"
            MERGE (e:Entity {name: $name})
            SET e.type = $type,
                e.description = $description,
                e.source_ids = $source_ids
            "#
            .to_string(),
        )
        .param("name", entity.name.clone())
        .param("type", entity.entity_type.clone())
        .param("description", entity.description.clone())
        .param("source_ids", entity.source_chunk_ids.join(GRAPH_FIELD_SEP));

        self.graph
            .run(query)
            .await
            .with_context(|| format!("failed to upsert entity {}", entity.name))?;
        Ok(())
    }

    pub async fn get_relationship(
        &self,
        source: &str,
        target: &str,
    ) -> Result<Option<RelationshipRecord>> {
        let query = Query::new(
            r#"
            MATCH (s:Entity {name: $source})-[r:RELATED]->(t:Entity {name: $target})
            RETURN s.name as source, t.name as target, r.description as description,
                   r.keywords as keywords, r.strength as strength, r.source_ids as source_ids
            "#
            .to_string(),
        )
        .param("source", source.to_string())
        .param("target", target.to_string());

        let mut result = self.graph.execute(query).await?;

        match result.next().await? {
            Some(row) => Ok(Some(relationship_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Upsert an edge. Endpoint nodes are MERGEd first so a relationship
    /// naming an entity the extractor never described still lands.
    pub async fn upsert_relationship(&self, rel: &RelationshipRecord) -> Result<()> {
        for name in [&rel.source, &rel.target] {
            let query = Query::new(
                r#"
                MERGE (e:Entity {name: $name})
                ON CREATE SET e.type = 'UNKNOWN', e.description = '', e.source_ids = ''
                "#
                .to_string(),
            )
            .param("name", name.to_string());
            self.graph
                .run(query)
                .await
                .context("failed to ensure relationship endpoint")?;
        }

        let query = Query::new(
            r#"
            MATCH (s:Entity {name: $source})
            MATCH (t:Entity {name: $target})
            MERGE (s)-[r:RELATED]->(t)
            SET r.description = $description,
                r.keywords = $keywords,
                r.strength = $strength,
                r.source_ids = $source_ids
            "#
            .to_string(),
        )
        .param("source", rel.source.clone())
        .param("target", rel.target.clone())
        .param("description", rel.description.clone())
        .param("keywords", rel.keywords.join(", "))
        .param("strength", rel.strength as f64)
        .param("source_ids", rel.source_chunk_ids.join(GRAPH_FIELD_SEP));

        self.graph
            .run(query)
            .await
            .with_context(|| format!("failed to upsert relationship {} -> {}", rel.source, rel.target))?;
        Ok(())
    }

    /// One-hop expansion: the named entities, their direct neighbors, and
    /// every relationship touching the named set.
    pub async fn neighborhood(
        &self,
        names: &[String],
    ) -> Result<(Vec<EntityRecord>, Vec<RelationshipRecord>)> {
        if names.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let query = Query::new(
            r#"
            MATCH (e:Entity)
            WHERE e.name IN $names
            OPTIONAL MATCH (e)-[:RELATED]-(n:Entity)
            WITH collect(DISTINCT e) + collect(DISTINCT n) as nodes
            UNWIND nodes as node
            WITH DISTINCT node WHERE node IS NOT NULL
            RETURN node.name as name, node.type as type, node.description as description,
                   node.source_ids as source_ids
            "#
            .to_string(),
        )
        .param("names", names.to_vec());

        let mut entities = Vec::new();
        let mut result = self.graph.execute(query).await?;
        while let Some(row) = result.next().await? {
            entities.push(entity_from_row(&row)?);
        }

        let query = Query::new(
            r#"
            MATCH (s:Entity)-[r:RELATED]->(t:Entity)
            WHERE s.name IN $names OR t.name IN $names
            RETURN s.name as source, t.name as target, r.description as description,
                   r.keywords as keywords, r.strength as strength, r.source_ids as source_ids
            LIMIT 200
            "#
            .to_string(),
        )
        .param("names", names.to_vec());

        let mut relationships = Vec::new();
        let mut result = self.graph.execute(query).await?;
        while let Some(row) = result.next().await? {
            relationships.push(relationship_from_row(&row)?);
        }

        Ok((entities, relationships))
    }

    /// Fetch relationships by exact (source, target) pairs, endpoints included.
    pub async fn relationships_with_endpoints(
        &self,
        pairs: &[(String, String)],
    ) -> Result<(Vec<EntityRecord>, Vec<RelationshipRecord>)> {
        let mut entities = Vec::new();
        let mut relationships = Vec::new();
        let mut seen_entities = std::collections::HashSet::new();

        for (source, target) in pairs {
            if let Some(rel) = self.get_relationship(source, target).await? {
                relationships.push(rel);
            }
            for name in [source, target] {
                if seen_entities.insert(name.clone()) {
                    if let Some(entity) = self.get_entity(name).await? {
                        entities.push(entity);
                    }
                }
            }
        }

        Ok((entities, relationships))
    }

    pub async fn stats(&self) -> Result<GraphStats> {
        let mut result = self
            .graph
            .execute(Query::new(
                "MATCH (e:Entity) RETURN count(e) as count".to_string(),
            ))
            .await?;
        let entity_count = match result.next().await? {
            Some(row) => row.get::<i64>("count").unwrap_or(0) as usize,
            None => 0,
        };

        let mut result = self
            .graph
            .execute(Query::new(
                "MATCH ()-[r:RELATED]->() RETURN count(r) as count".to_string(),
            ))
            .await?;
        let relationship_count = match result.next().await? {
            Some(row) => row.get::<i64>("count").unwrap_or(0) as usize,
            None => 0,
        };

        Ok(GraphStats {
            entity_count,
            relationship_count,
        })
    }

    /// Remove every entity and relationship. Used by the purge path only.
    pub async fn drop_all(&self) -> Result<()> {
        self.graph
            .run(Query::new("MATCH (n:Entity) DETACH DELETE n".to_string()))
            .await
            .context("failed to clear graph")?;
        Ok(())
    }
}

fn entity_from_row(row: &neo4rs::Row) -> Result<EntityRecord> {
    let name: String = row.get("name")?;
    let entity_type = row.get("type").unwrap_or_else(|_| "UNKNOWN".to_string());
    let description = row.get("description").unwrap_or_else(|_| String::new());
    let source_ids: String = row.get("source_ids").unwrap_or_else(|_| String::new());

    Ok(EntityRecord {
        name,
        entity_type,
        description,
        source_chunk_ids: split_source_ids(&source_ids),
    })
}

fn relationship_from_row(row: &neo4rs::Row) -> Result<RelationshipRecord> {
    let source: String = row.get("source")?;
    let target: String = row.get("target")?;
    let description = row.get("description").unwrap_or_else(|_| String::new());
    let keywords: String = row.get("keywords").unwrap_or_else(|_| String::new());
    let strength = row.get::<f64>("strength").unwrap_or(1.0) as f32;
    let source_ids: String = row.get("source_ids").unwrap_or_else(|_| String::new());

    Ok(RelationshipRecord {
        source,
        target,
        description,
        keywords: split_keywords(&keywords),
        strength,
        source_chunk_ids: split_source_ids(&source_ids),
    })
}

fn split_source_ids(joined: &str) -> Vec<String> {
    joined
        .split(GRAPH_FIELD_SEP)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn split_keywords(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_ids_round_trip_through_field_sep() {
        let joined = ["a", "b", "c"].join(GRAPH_FIELD_SEP);
        assert_eq!(split_source_ids(&joined), vec!["a", "b", "c"]);
        assert!(split_source_ids("").is_empty());
    }

    #[test]
    fn keywords_split_on_commas() {
        assert_eq!(
            split_keywords("inspection, validation , "),
            vec!["inspection", "validation"]
        );
    }
}
