use crate::util::substitute;

/// The skeleton test page, with the title appearing in both `<title>` and `<h1>`.
#[derive(Eq, PartialEq, Debug)]
pub struct StubDocument {
    title: String,
}

impl StubDocument {
    pub fn new(title: &str, escape: bool) -> Self {
        StubDocument {
            title: substitute(title, escape).into_owned(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            r###"<!DOCTYPE html>
<html lang="en">
  <head>
    <title>{title}</title>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1"/>
    <link rel="stylesheet" href="style.css"/>
    <script type="module">
      import test from "./test.js";
      import {{ Scheduler, Fiber }} from "../lib/shell.js";
    </script>
  </head>
  <body>
    <h1>{title}</h1>
    <div class="tests"></div>
    <p><a href="index.html">Back</a></p>
  </body>
</html>"###,
            title = self.title
        )
    }
}
