//! Built-in starter diagrams.

use flowcraft_common::Template;

struct Builtin {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    content: &'static str,
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        id: "flowchart-basic",
        name: "Basic Flowchart",
        description: "A simple flowchart template",
        category: "Flowchart",
        content: r#"flowchart TD
    A[Start] --> B{Decision?}
    B -->|Yes| C[Process 1]
    B -->|No| D[Process 2]
    C --> E[End]
    D --> E"#,
    },
    Builtin {
        id: "sequence-basic",
        name: "Basic Sequence Diagram",
        description: "A simple sequence diagram template",
        category: "Sequence",
        content: r#"sequenceDiagram
    participant A as Alice
    participant B as Bob
    A->>B: Hello Bob, how are you?
    B-->>A: Great!"#,
    },
    Builtin {
        id: "class-basic",
        name: "Basic Class Diagram",
        description: "A simple class diagram template",
        category: "Class",
        content: r#"classDiagram
    class Animal {
        +String name
        +int age
        +makeSound()
    }
    class Dog {
        +String breed
        +bark()
    }
    Animal <|-- Dog"#,
    },
    Builtin {
        id: "state-basic",
        name: "Basic State Diagram",
        description: "A simple state diagram template",
        category: "State",
        content: r#"stateDiagram-v2
    [*] --> Still
    Still --> [*]
    Still --> Moving
    Moving --> Still
    Moving --> Crash
    Crash --> [*]"#,
    },
    Builtin {
        id: "gantt-basic",
        name: "Basic Gantt Chart",
        description: "A simple gantt chart template",
        category: "Gantt",
        content: r#"gantt
    title A Gantt Diagram
    dateFormat  YYYY-MM-DD
    section Section
    A task           :a1, 2014-01-01, 30d
    Another task     :after a1  , 20d
    section Another
    Task in sec      :2014-01-12  , 12d
    another task      : 24d"#,
    },
    Builtin {
        id: "pie-basic",
        name: "Basic Pie Chart",
        description: "A simple pie chart template",
        category: "Pie",
        content: r#"pie title Sample Pie Chart
    "Dogs" : 386
    "Cats" : 85
    "Birds" : 15"#,
    },
];

/// Ordered, immutable template catalog
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn builtin() -> Self {
        Self {
            templates: BUILTINS
                .iter()
                .map(|b| Template {
                    id: b.id.to_string(),
                    name: b.name.to_string(),
                    description: b.description.to_string(),
                    content: b.content.to_string(),
                    category: b.category.to_string(),
                })
                .collect(),
        }
    }

    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates grouped by category, in catalog order
    pub fn by_category(&self) -> Vec<(&str, Vec<&Template>)> {
        let mut groups: Vec<(&str, Vec<&Template>)> = Vec::new();
        for template in &self.templates {
            match groups.iter_mut().find(|(c, _)| *c == template.category) {
                Some((_, members)) => members.push(template),
                None => groups.push((template.category.as_str(), vec![template])),
            }
        }
        groups
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The built-in catalog
pub fn get_templates() -> Vec<Template> {
    TemplateCatalog::builtin().templates
}
