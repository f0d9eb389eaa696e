use tasklist_core::{
  Filter,
  FilterCounts
};
use web_sys::HtmlSelectElement;
use yew::{
  Callback,
  Event,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterSelectProps {
  pub value:     Filter,
  pub counts:    FilterCounts,
  pub disabled:  bool,
  pub on_change: Callback<Filter>
}

#[function_component(FilterSelect)]
pub fn filter_select(
  props: &FilterSelectProps
) -> Html {
  let onchange = {
    let on_change =
      props.on_change.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      match select.value().parse::<Filter>()
      {
        | Ok(filter) => {
          on_change.emit(filter)
        }
        | Err(error) => {
          tracing::warn!(
            %error,
            "ignoring unknown filter"
          )
        }
      }
    })
  };

  html! {
      <select
          class="form-select filter-select"
          disabled={props.disabled}
          onchange={onchange}
      >
          {
              for Filter::ALL.iter().map(|filter| html! {
                  <option
                      value={filter.as_str()}
                      selected={*filter == props.value}
                  >
                      { format!("{} ({})", filter.label(), props.counts.get(*filter)) }
                  </option>
              })
          }
      </select>
  }
}
