/*!
Concatenate an ordered list of source files into a single file, with a
comment banner before each one.

That's useful for courses that take a single source file as submission
while the project itself is kept in separate headers and implementations.

```no_run
use sourceconsolidator::Consolidator;
use sourceconsolidator::Manifest;

let manifest = Manifest::rref();
Consolidator::new(&manifest).run()?;
# Ok::<(), sourceconsolidator::Error>(())
```
*/

pub mod consolidator;
pub mod error;
pub mod manifest;
pub mod splitter;

pub use consolidator::banner;
pub use consolidator::consolidate;
pub use consolidator::Consolidator;
pub use error::Error;
pub use error::Result;
pub use manifest::Entry;
pub use manifest::Manifest;
pub use splitter::split;
pub use splitter::split_file;
